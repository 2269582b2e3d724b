use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_PATH: &str = "./data/threatgen.db";
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Contents of the optional YAML configuration file. Every section is optional;
/// command-line flags take precedence over file values.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ThreatgenConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub inference: Option<InferenceConfig>,
    pub uploads: Option<UploadConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InferenceConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct UploadConfig {
    /// Where raw uploads are kept. Uploads are not saved when unset.
    pub directory: Option<String>,
}

/// Fully resolved inference settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceSettings {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl ThreatgenConfig {
    pub fn host(&self) -> String {
        self.server.as_ref()
            .and_then(|s| s.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn db_path(&self) -> String {
        self.database.as_ref()
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
    }

    pub fn upload_dir(&self) -> Option<PathBuf> {
        self.uploads.as_ref()?.directory.as_ref().map(PathBuf::from)
    }

    pub fn inference_settings(&self) -> InferenceSettings {
        let inference = self.inference.clone().unwrap_or_default();
        InferenceSettings {
            base_url: inference.base_url,
            model: inference.model,
            timeout: Duration::from_secs(inference.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
