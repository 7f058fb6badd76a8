//! Model-backed learning material generation

use lessoncore::ParameterSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::llm::{CompletionRequest, LlmClient, LlmError};
use crate::prompts::PromptLoader;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to render prompt: {0}")]
    Prompt(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("No content received from the LLM API")]
    EmptyResponse,
}

/// Ask the model for the learning object described by `params`
pub async fn generate(
    llm: &dyn LlmClient,
    prompts: &PromptLoader,
    params: &ParameterSet,
    config: &LlmConfig,
) -> Result<String, GenerateError> {
    debug!(grade = %params.grade, topic = %params.topic, "generate: called");
    let system_prompt = prompts.system_prompt().map_err(|e| GenerateError::Prompt(e.to_string()))?;
    let user_prompt = prompts
        .generate_prompt(params)
        .map_err(|e| GenerateError::Prompt(e.to_string()))?;

    let mut request = CompletionRequest::single(system_prompt, user_prompt, config.max_tokens);
    request.temperature = Some(config.temperature);

    let response = llm.complete(request).await?;
    let text = response.text().ok_or(GenerateError::EmptyResponse)?;
    info!(
        output_tokens = response.usage.output_tokens,
        "generate: received {} chars",
        text.len()
    );
    Ok(text.to_string())
}
