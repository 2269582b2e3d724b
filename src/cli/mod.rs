pub mod commands;
pub mod serve;
pub mod ingest;
pub mod threats;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use crate::config::{self, ThreatgenConfig};
use crate::errors::ThreatError;

/// Load the config file when one was given, otherwise all defaults.
pub(crate) async fn load_config(path: Option<&str>) -> Result<ThreatgenConfig, ThreatError> {
    match path {
        Some(p) => config::parse_config(&PathBuf::from(p)).await,
        None => Ok(ThreatgenConfig::default()),
    }
}
