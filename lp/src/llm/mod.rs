//! LLM client module
//!
//! Provides chat completion requests against the configured provider.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// System prompt for the connectivity check
pub const PING_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// User message for the connectivity check
pub const PING_MESSAGE: &str = "Say hello!";

/// Token cap for the connectivity check
pub const PING_MAX_TOKENS: u32 = 50;

/// Create an LLM client based on the provider specified in config
///
/// Only "openai" is supported. Fails with `MissingApiKey` when the
/// configured environment variable is unset or empty.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::InvalidResponse(format!(
                "Unknown LLM provider: '{}'. Supported: openai",
                other
            )))
        }
    }
}

/// Send a tiny request to confirm the provider is reachable
///
/// Returns the model's reply text.
pub async fn ping(llm: &dyn LlmClient) -> Result<String, LlmError> {
    debug!("ping: called");
    let request = CompletionRequest::single(PING_SYSTEM_PROMPT, PING_MESSAGE, PING_MAX_TOKENS);
    let response = llm.complete(request).await?;
    response
        .text()
        .map(str::to_string)
        .ok_or_else(|| LlmError::InvalidResponse("No content received from the LLM API".to_string()))
}
