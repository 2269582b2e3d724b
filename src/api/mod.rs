pub mod routes;
pub mod errors;

use std::path::PathBuf;
use std::sync::Arc;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::InferenceSettings;
use crate::db::Database;
use crate::errors::ThreatError;
use crate::generation::Generator;
use crate::ingest::IngestPipeline;
use crate::llm::{InferenceClient, LLMProvider, OllamaProvider};

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub pipeline: IngestPipeline,
    /// Raw uploads are kept here when set.
    pub upload_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(db: Database, provider: Arc<dyn LLMProvider>, settings: &InferenceSettings) -> Self {
        let client = InferenceClient::new(provider).with_timeout(settings.timeout);
        Self {
            db,
            pipeline: IngestPipeline::new(Generator::new(client)),
            upload_dir: None,
        }
    }

    pub fn with_upload_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.upload_dir = dir;
        self
    }
}

pub async fn create_app_state(
    db_path: &str,
    settings: &InferenceSettings,
    upload_dir: Option<PathBuf>,
) -> Result<AppState, ThreatError> {
    let db = Database::new(db_path)?;
    let provider = Arc::new(OllamaProvider::new(settings.base_url.as_deref(), settings.model.as_deref()));
    Ok(AppState::new(db, provider, settings).with_upload_dir(upload_dir))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/upload", post(routes::upload::upload_threats))
        .route("/api/upload", post(routes::upload::upload_threats))
        .route("/api/threats", get(routes::threats::list_threats))
        .route("/api/threats/:id", get(routes::threats::get_threat).delete(routes::threats::delete_threat))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
