use std::path::Path;
use crate::errors::ThreatError;
use super::types::ThreatgenConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<ThreatgenConfig, ThreatError> {
    if !path.exists() {
        return Err(ThreatError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(ThreatError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<ThreatgenConfig, ThreatError> {
    // An empty file is a valid, all-defaults config.
    if content.trim().is_empty() {
        return Ok(ThreatgenConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_schema(&yaml)?;

    let config: ThreatgenConfig = serde_yaml::from_value(yaml)?;

    validate_values(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ThreatError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| ThreatError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ThreatError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; typed deserialization below is authoritative.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Reject values that deserialize fine but cannot work at runtime.
fn validate_values(config: &ThreatgenConfig) -> Result<(), ThreatError> {
    if let Some(server) = &config.server {
        if server.port == Some(0) {
            return Err(ThreatError::Config("server.port must be greater than 0".into()));
        }
    }

    if let Some(inference) = &config.inference {
        if inference.timeout_secs == Some(0) {
            return Err(ThreatError::Config("inference.timeout_secs must be greater than 0".into()));
        }
        if let Some(url) = &inference.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ThreatError::Config(format!(
                    "inference.base_url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }
    }

    if let Some(database) = &config.database {
        if database.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ThreatError::Config("database.path must not be empty".into()));
        }
    }

    Ok(())
}
