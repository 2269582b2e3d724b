use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThreatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<csv::Error> for ThreatError {
    fn from(e: csv::Error) -> Self {
        ThreatError::Csv(e.to_string())
    }
}
