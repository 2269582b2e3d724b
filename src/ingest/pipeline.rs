use crate::db::{Database, UnitOfWork};
use crate::errors::ThreatError;
use crate::generation::Generator;
use crate::models::{IngestSummary, TestCase, Threat, ThreatReport, Vulnerability};
use super::reader::{read_rows, ThreatRow};
use tracing::{debug, info};

/// Drives the generator over spreadsheet rows and registers the resulting
/// hierarchy in a unit of work.
#[derive(Clone)]
pub struct IngestPipeline {
    generator: Generator,
}

impl IngestPipeline {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    /// Process rows strictly in order. Rows with a blank title or description
    /// are skipped without any inference calls. Nothing is committed here.
    pub async fn run(&self, rows: &[ThreatRow], uow: &mut UnitOfWork) -> Result<IngestSummary, ThreatError> {
        let mut summary = IngestSummary::default();

        for (row_number, row) in rows.iter().enumerate() {
            let Some((title, description)) = row.validated() else {
                debug!(row = row_number + 1, "Skipping row with blank title or description");
                summary.skipped_rows += 1;
                continue;
            };

            info!(row = row_number + 1, title, "Expanding threat");
            let threat = Threat::new(title, description);
            uow.add_threat(threat.clone())?;

            let generated = self.generator.expand(title, description).await;

            for (i, vuln_data) in generated.iter().enumerate() {
                let vuln = Vulnerability::new(&threat, &vuln_data.description, i as u32 + 1);
                for (j, case) in vuln_data.test_cases.iter().enumerate() {
                    uow.add_test_case(TestCase::new(&vuln, case, j as u32 + 1))?;
                }
                uow.add_vulnerability(vuln)?;
            }

            summary.threats.push(ThreatReport {
                title: title.to_string(),
                description: description.to_string(),
                vulnerabilities: generated,
            });
        }

        if summary.skipped_rows > 0 {
            debug!(skipped = summary.skipped_rows, "Rows skipped during ingestion");
        }
        Ok(summary)
    }
}

/// Parse an uploaded CSV, expand every valid row and commit the whole
/// hierarchy in one unit of work.
///
/// Parsing happens before the unit of work is opened, so malformed input
/// never touches the store. Any later failure discards everything.
pub async fn ingest_csv(
    data: &[u8],
    pipeline: &IngestPipeline,
    db: &Database,
) -> Result<IngestSummary, ThreatError> {
    let rows = read_rows(data)?;
    info!(rows = rows.len(), "Spreadsheet parsed");

    let mut uow = db.begin();
    let result = match pipeline.run(&rows, &mut uow).await {
        Ok(summary) => uow.commit().map(|_| summary),
        Err(e) => {
            uow.rollback();
            Err(e)
        }
    };
    uow.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::llm::fake::FakeProvider;
    use crate::llm::InferenceClient;

    fn pipeline_with(fake: Arc<FakeProvider>) -> IngestPipeline {
        IngestPipeline::new(Generator::new(InferenceClient::new(fake)))
    }

    fn canned(prompt: &str) -> Result<String, ThreatError> {
        if prompt.starts_with("Title:") {
            Ok("- Unvalidated redirect target\n- Token leaked in Referer".to_string())
        } else {
            Ok("✅ TC1.1: Probe it\nfiller".to_string())
        }
    }

    #[tokio::test]
    async fn test_ingest_persists_full_hierarchy() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(canned));
        let csv = "Title,Description\nOpen redirect,Login redirect param\n";

        let summary = ingest_csv(csv.as_bytes(), &pipeline_with(fake), &db).await.unwrap();

        assert_eq!(summary.threats.len(), 1);
        assert_eq!(summary.total_vulnerabilities(), 2);
        assert_eq!(summary.total_test_cases(), 2);

        let counts = db.entity_counts().unwrap();
        assert_eq!((counts.threats, counts.vulnerabilities, counts.test_cases), (1, 2, 2));

        let listing = db.list_threats(10, 0).unwrap();
        let tree = db.get_threat_tree(&listing[0].id).unwrap().unwrap();
        assert_eq!(tree.vulnerabilities[0].description, "Unvalidated redirect target");
        assert_eq!(tree.vulnerabilities[1].description, "Token leaked in Referer");
    }

    #[tokio::test]
    async fn test_invalid_rows_skipped_without_inference() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(|_| Ok(String::new())));
        let csv = "Title,Description\n  ,has description\nhas title,   \nValid,Row\n,\n";

        let summary = ingest_csv(csv.as_bytes(), &pipeline_with(fake.clone()), &db).await.unwrap();

        assert_eq!(summary.threats.len(), 1);
        assert_eq!(summary.skipped_rows, 3);
        assert_eq!(summary.threats[0].title, "Valid");
        assert_eq!(fake.calls().len(), 1);
        assert_eq!(db.entity_counts().unwrap().threats, 1);
    }

    #[tokio::test]
    async fn test_dead_inference_still_records_threats() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(|_| Err(ThreatError::Timeout("no answer".into()))));
        let csv = "Title,Description\nMalware,Drive-by download\nInsider,Data exfiltration\n";

        let summary = ingest_csv(csv.as_bytes(), &pipeline_with(fake), &db).await.unwrap();

        assert_eq!(summary.threats.len(), 2);
        assert!(summary.threats.iter().all(|t| t.vulnerabilities.is_empty()));
        let counts = db.entity_counts().unwrap();
        assert_eq!((counts.threats, counts.vulnerabilities), (2, 0));
    }

    #[tokio::test]
    async fn test_values_are_trimmed_before_storage() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(|_| Ok(String::new())));
        let csv = "Title,Description\n  Spoofing  ,  Forged sender  \n";

        let summary = ingest_csv(csv.as_bytes(), &pipeline_with(fake.clone()), &db).await.unwrap();
        assert_eq!(summary.threats[0].title, "Spoofing");
        assert!(fake.calls()[0].starts_with("Title:\nSpoofing\n\nDescription:\nForged sender\n"));
    }

    #[tokio::test]
    async fn test_malformed_csv_touches_nothing() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(canned));
        let result = ingest_csv(b"Title,Description\n\xff,\xfe\n", &pipeline_with(fake.clone()), &db).await;

        assert!(matches!(result, Err(ThreatError::Csv(_))));
        assert!(fake.calls().is_empty());
        assert_eq!(db.entity_counts().unwrap().threats, 0);
    }

    #[tokio::test]
    async fn test_reupload_duplicates_threats() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(|_| Ok(String::new())));
        let pipeline = pipeline_with(fake);
        let csv = b"Title,Description\nDNS spoofing,Poisoned resolver cache\n";

        ingest_csv(csv, &pipeline, &db).await.unwrap();
        ingest_csv(csv, &pipeline, &db).await.unwrap();

        assert_eq!(db.entity_counts().unwrap().threats, 2);
    }

    #[tokio::test]
    async fn test_run_on_closed_unit_of_work_fails() {
        let db = Database::in_memory().unwrap();
        let fake = Arc::new(FakeProvider::new(|_| Ok(String::new())));
        let rows = read_rows(b"Title,Description\nA,B\n").unwrap();

        let mut uow = db.begin();
        uow.rollback();
        let result = pipeline_with(fake).run(&rows, &mut uow).await;
        assert!(matches!(result, Err(ThreatError::Internal(_))));
    }
}
