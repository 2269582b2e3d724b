use std::time::Duration;
use async_trait::async_trait;
use crate::errors::ThreatError;
use super::types::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Non-streaming text generation. Must give up after `timeout` with
    /// [`ThreatError::Timeout`].
    async fn complete(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<LLMResponse, ThreatError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
