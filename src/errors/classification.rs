use super::types::ThreatError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Short label returned to API callers in the `error` field.
    pub public_message: &'static str,
    /// True when the caller sent something unusable (maps to a 4xx response).
    pub client_fault: bool,
}

impl ThreatError {
    /// Classify this error for reporting at the HTTP and CLI boundaries.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ThreatError::BadRequest(_) => ErrorClassification {
                error_type: "BadRequestError",
                public_message: "Bad request",
                client_fault: true,
            },
            ThreatError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                public_message: "Configuration error",
                client_fault: false,
            },
            ThreatError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                public_message: "Database error",
                client_fault: false,
            },

            // Malformed uploads are not distinguished from other unexpected failures.
            ThreatError::Csv(_) => ErrorClassification {
                error_type: "CsvError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::LLMApi(_) => ErrorClassification {
                error_type: "LLMApiError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::Io(_) => ErrorClassification {
                error_type: "IoError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                public_message: "Internal server error",
                client_fault: false,
            },
            ThreatError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                public_message: "Internal server error",
                client_fault: false,
            },
        }
    }
}
