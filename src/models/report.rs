use serde::{Deserialize, Serialize};

/// One vulnerability produced by the generator, with its ordered test cases.
///
/// This is also the wire shape of each entry in an upload response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVulnerability {
    pub description: String,
    pub test_cases: Vec<String>,
}

/// A processed threat as returned to the uploader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatReport {
    pub title: String,
    pub description: String,
    pub vulnerabilities: Vec<GeneratedVulnerability>,
}

/// Result of one ingestion run over a spreadsheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestSummary {
    pub threats: Vec<ThreatReport>,
    /// Rows skipped for a blank title or description.
    pub skipped_rows: usize,
}

impl IngestSummary {
    pub fn total_vulnerabilities(&self) -> usize {
        self.threats.iter().map(|t| t.vulnerabilities.len()).sum()
    }

    pub fn total_test_cases(&self) -> usize {
        self.threats
            .iter()
            .flat_map(|t| &t.vulnerabilities)
            .map(|v| v.test_cases.len())
            .sum()
    }
}
