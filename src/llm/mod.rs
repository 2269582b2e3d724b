pub mod provider;
pub mod ollama;
pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use provider::LLMProvider;
pub use ollama::OllamaProvider;
pub use client::InferenceClient;
pub use types::LLMResponse;
