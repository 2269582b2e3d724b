use std::path::PathBuf;
use std::time::Duration;
use crate::cli::commands::{InferenceArgs, ServeArgs};
use crate::config::{InferenceSettings, ThreatgenConfig};
use crate::errors::ThreatError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), ThreatError> {
    let file_config = super::load_config(args.config.as_deref()).await?;

    let host = args.host.clone().unwrap_or_else(|| file_config.host());
    let port = args.port.unwrap_or_else(|| file_config.port());
    let db_path = args.db.clone().unwrap_or_else(|| file_config.db_path());
    let upload_dir = args.upload_dir.as_ref().map(PathBuf::from).or_else(|| file_config.upload_dir());
    let settings = inference_settings(&args.inference, &file_config)?;

    info!(
        host = %host,
        port,
        db = %db_path,
        model = settings.model.as_deref().unwrap_or(crate::llm::ollama::DEFAULT_MODEL),
        timeout_secs = settings.timeout.as_secs(),
        "Starting API server"
    );

    let state = api::create_app_state(&db_path, &settings, upload_dir).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ThreatError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}

/// CLI flags win over the config file; the file wins over defaults.
pub(crate) fn inference_settings(
    args: &InferenceArgs,
    file_config: &ThreatgenConfig,
) -> Result<InferenceSettings, ThreatError> {
    let mut settings = file_config.inference_settings();
    if let Some(url) = &args.base_url {
        settings.base_url = Some(url.clone());
    }
    if let Some(model) = &args.model {
        settings.model = Some(model.clone());
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            return Err(ThreatError::Config("--timeout must be greater than 0".into()));
        }
        settings.timeout = Duration::from_secs(secs);
    }
    Ok(settings)
}
