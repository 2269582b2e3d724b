//! Scripted provider for unit tests.

use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use crate::errors::ThreatError;
use super::provider::LLMProvider;
use super::types::LLMResponse;

type Responder = Box<dyn Fn(&str) -> Result<String, ThreatError> + Send + Sync>;

pub(crate) struct FakeProvider {
    responder: Responder,
    calls: Mutex<Vec<String>>,
    last_timeout: Mutex<Option<Duration>>,
}

impl FakeProvider {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&str) -> Result<String, ThreatError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            last_timeout: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_timeout(&self) -> Option<Duration> {
        *self.last_timeout.lock().unwrap()
    }
}

#[async_trait]
impl LLMProvider for FakeProvider {
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<LLMResponse, ThreatError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        *self.last_timeout.lock().unwrap() = Some(timeout);
        let content = (self.responder)(prompt)?;
        Ok(LLMResponse { content, input_tokens: None, output_tokens: None, model: "fake".into() })
    }

    fn provider_name(&self) -> &str { "fake" }
    fn model_name(&self) -> &str { "fake" }
}
