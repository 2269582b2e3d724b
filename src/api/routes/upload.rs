use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::errors::ThreatError;
use crate::ingest::{ingest_csv, storage::save_upload};
use tracing::{error, info};

/// Multipart field that carries the spreadsheet.
pub const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    data: Bytes,
}

/// Find the `file` part of the request. A part without a filename is a plain
/// form field, not a file.
async fn read_file_field(multipart: &mut Multipart) -> Result<Upload, ThreatError> {
    while let Some(field) = multipart.next_field().await
        .map_err(|e| ThreatError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.is_empty() {
            return Err(ThreatError::BadRequest("No file selected".into()));
        }
        let data = field.bytes().await
            .map_err(|e| ThreatError::BadRequest(format!("Failed to read upload: {}", e)))?;
        return Ok(Upload { filename, data });
    }

    Err(ThreatError::BadRequest("No file part".into()))
}

pub async fn upload_threats(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ThreatError> {
    let mut multipart = multipart.map_err(|_| ThreatError::BadRequest("No file part".into()))?;
    let upload = read_file_field(&mut multipart).await?;
    info!(filename = %upload.filename, bytes = upload.data.len(), "Upload received");

    if let Some(dir) = &state.upload_dir {
        save_upload(dir, &upload.filename, &upload.data).await.map_err(|e| {
            error!(error = %e, "Failed to save upload");
            e
        })?;
    }

    let summary = ingest_csv(&upload.data, &state.pipeline, &state.db).await.map_err(|e| {
        error!(error = %e, error_debug = ?e, filename = %upload.filename, "Upload processing failed");
        e
    })?;

    info!(
        threats = summary.threats.len(),
        vulnerabilities = summary.total_vulnerabilities(),
        test_cases = summary.total_test_cases(),
        skipped_rows = summary.skipped_rows,
        "Upload processed"
    );

    Ok(Json(json!({
        "message": "Processed successfully",
        "threats": summary.threats,
        "skipped_rows": summary.skipped_rows,
    })))
}
