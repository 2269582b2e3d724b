use std::path::{Path, PathBuf};
use crate::errors::ThreatError;
use tracing::debug;

const FALLBACK_NAME: &str = "upload.csv";

/// Save a raw upload under `dir`, keeping only the base name of the
/// client-supplied filename. Returns the path written.
pub async fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf, ThreatError> {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME);

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, data).await?;
    debug!(path = %path.display(), bytes = data.len(), "Upload saved");
    Ok(path)
}
