use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::errors::ThreatError;
use super::provider::LLMProvider;
use super::types::{GenerateRequest, GenerateResponse, LLMResponse};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "mistral";

/// Client for a local Ollama server's `/api/generate` endpoint.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: Option<&str>, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/').to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

fn request_error(e: reqwest::Error, timeout: Duration) -> ThreatError {
    if e.is_timeout() {
        ThreatError::Timeout(format!("Ollama did not answer within {}s", timeout.as_secs()))
    } else {
        ThreatError::Network(format!("Ollama request failed: {}", e))
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<LLMResponse, ThreatError> {
        let body = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let resp = self.client
            .post(self.endpoint())
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_error(e, timeout))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ThreatError::LLMApi(format!("Ollama returned HTTP {}", status)));
        }

        let data: GenerateResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                request_error(e, timeout)
            } else {
                ThreatError::LLMApi(format!("Failed to parse Ollama response: {}", e))
            }
        })?;

        debug!(
            model = %self.model,
            input_tokens = data.prompt_eval_count,
            output_tokens = data.eval_count,
            "Ollama completion"
        );

        Ok(LLMResponse {
            content: data.response,
            input_tokens: data.prompt_eval_count,
            output_tokens: data.eval_count,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "ollama" }
    fn model_name(&self) -> &str { &self.model }
}
