//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files sent to the language model.
//!
//! Template loading chain:
//! 1. `{prompts-dir}/{name}.pmt` (configured override directory)
//! 2. Embedded fallback in code
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{GenerateContext, GradeContext, PromptLoader};
