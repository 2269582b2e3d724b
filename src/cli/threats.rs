use crate::cli::commands::ThreatsArgs;
use crate::db::Database;
use crate::errors::ThreatError;

pub async fn handle_threats(args: ThreatsArgs) -> Result<(), ThreatError> {
    let file_config = super::load_config(args.config.as_deref()).await?;
    let db = Database::new(&args.db.clone().unwrap_or_else(|| file_config.db_path()))?;

    if let Some(id) = &args.id {
        let tree = db.get_threat_tree(id)?
            .ok_or_else(|| ThreatError::BadRequest(format!("No threat with id {}", id)))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&tree)?);
        } else {
            println!("{}\n{}\n", tree.title, tree.description);
            for (i, vuln) in tree.vulnerabilities.iter().enumerate() {
                println!("  {}. {}", i + 1, vuln.description);
                for tc in &vuln.test_cases {
                    println!("       {}", tc.description);
                }
            }
        }
        return Ok(());
    }

    let threats = db.list_threats(args.limit, args.offset)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&threats)?);
    } else {
        let counts = db.entity_counts()?;
        for t in &threats {
            println!("{}  {}  ({} vulnerabilities)  {}", t.id, t.created_at, t.vulnerability_count, t.title);
        }
        println!(
            "\n{} threats, {} vulnerabilities, {} test cases stored",
            counts.threats, counts.vulnerabilities, counts.test_cases
        );
    }

    Ok(())
}
