use std::sync::Arc;
use crate::cli::commands::IngestArgs;
use crate::db::Database;
use crate::errors::ThreatError;
use crate::generation::Generator;
use crate::ingest::{ingest_csv, IngestPipeline};
use crate::llm::{InferenceClient, OllamaProvider};
use tracing::info;

pub async fn handle_ingest(args: IngestArgs) -> Result<(), ThreatError> {
    let file_config = super::load_config(args.config.as_deref()).await?;
    let db_path = args.db.clone().unwrap_or_else(|| file_config.db_path());
    let settings = super::serve::inference_settings(&args.inference, &file_config)?;

    let data = tokio::fs::read(&args.file).await.map_err(|e| {
        ThreatError::BadRequest(format!("Cannot read {}: {}", args.file, e))
    })?;

    let db = Database::new(&db_path)?;
    let provider = Arc::new(OllamaProvider::new(settings.base_url.as_deref(), settings.model.as_deref()));
    let client = InferenceClient::new(provider).with_timeout(settings.timeout);
    let pipeline = IngestPipeline::new(Generator::new(client));

    info!(file = %args.file, db = %db_path, "Ingesting threats");
    let summary = ingest_csv(&data, &pipeline, &db).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for threat in &summary.threats {
            println!("{}", threat.title);
            for (i, vuln) in threat.vulnerabilities.iter().enumerate() {
                println!("  {}. {}", i + 1, vuln.description);
                for tc in &vuln.test_cases {
                    println!("       {}", tc);
                }
            }
        }
        println!(
            "\nStored {} threats, {} vulnerabilities, {} test cases ({} rows skipped)",
            summary.threats.len(),
            summary.total_vulnerabilities(),
            summary.total_test_cases(),
            summary.skipped_rows,
        );
    }

    Ok(())
}
