use std::sync::Arc;
use std::time::Duration;
use crate::errors::ThreatError;
use super::provider::LLMProvider;
use tracing::{debug, error, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Prompt-in, text-out wrapper that never fails.
///
/// Every provider error is logged and turned into an empty string, so a dead
/// inference service yields threats with no vulnerabilities instead of a
/// failed upload. No retries are attempted.
#[derive(Clone)]
pub struct InferenceClient {
    provider: Arc<dyn LLMProvider>,
    timeout: Duration,
}

impl InferenceClient {
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider, timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Generate text using the configured timeout.
    pub async fn generate(&self, prompt: &str) -> String {
        self.generate_with_timeout(prompt, self.timeout).await
    }

    pub async fn generate_with_timeout(&self, prompt: &str, timeout: Duration) -> String {
        debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            prompt_chars = prompt.len(),
            "Calling inference service"
        );

        match self.provider.complete(prompt, timeout).await {
            Ok(resp) => {
                info!(model = %resp.model, response_chars = resp.content.len(), "Inference response received");
                resp.content
            }
            Err(ThreatError::Timeout(msg)) => {
                warn!(timeout_secs = timeout.as_secs(), detail = %msg, "Inference request timed out");
                String::new()
            }
            Err(e) => {
                error!(error = %e, "Inference request failed");
                String::new()
            }
        }
    }
}
