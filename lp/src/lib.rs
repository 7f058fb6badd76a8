//! lessonprompt - EMS lesson prompt generator
//!
//! Request handling around [`lessoncore`]: an HTTP API and a CLI that compose
//! prompts locally, generate material through a language model, and score
//! text against the quality rubric.
//!
//! # Modules
//!
//! - [`config`] - Configuration types and loading
//! - [`llm`] - LLM client trait and OpenAI implementation
//! - [`prompts`] - Handlebars prompt templates for the model
//! - [`generate`] - Model-backed material generation
//! - [`grader`] - Model-backed scoring with keyword fallback
//! - [`server`] - axum HTTP API
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod generate;
pub mod grader;
pub mod llm;
pub mod prompts;
pub mod server;

pub use config::Config;
pub use generate::GenerateError;
pub use grader::Grader;
pub use llm::{LlmClient, LlmError, create_client};
pub use prompts::PromptLoader;
pub use server::{AppState, router};
