use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A top-level security concern read from one row of an uploaded spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threat {
    pub id: String,
    pub title: String,
    pub description: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl Threat {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// A weakness derived from a [`Threat`] by model-assisted expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    pub threat_id: String,
    pub description: String,
    /// 1-based order within the owning threat.
    pub position: u32,
}

impl Vulnerability {
    pub fn new(threat: &Threat, description: &str, position: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            threat_id: threat.id.clone(),
            description: description.to_string(),
            position,
        }
    }
}

/// A concrete verification scenario derived from a [`Vulnerability`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub vulnerability_id: String,
    pub description: String,
    /// 1-based order within the owning vulnerability.
    pub position: u32,
}

impl TestCase {
    pub fn new(vulnerability: &Vulnerability, description: &str, position: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            vulnerability_id: vulnerability.id.clone(),
            description: description.to_string(),
            position,
        }
    }
}
