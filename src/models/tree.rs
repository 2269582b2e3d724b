use serde::{Deserialize, Serialize};

/// A stored threat read back together with its full hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatTree {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub vulnerabilities: Vec<VulnerabilityNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VulnerabilityNode {
    pub id: String,
    pub description: String,
    pub test_cases: Vec<TestCaseNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseNode {
    pub id: String,
    pub description: String,
}

/// Row shape for threat listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: String,
    pub vulnerability_count: i64,
}
