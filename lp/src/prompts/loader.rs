//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use lessoncore::ParameterSet;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// Context for the `generate` template
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContext {
    pub grade: u8,
    pub topic: String,
    /// Display label, e.g. "Lesson Plan"
    pub learning_object_type: String,
    /// Lowercased label for use mid-sentence
    pub learning_object_type_lower: String,
    pub scaffolding_level: String,
    pub blooms_level: String,
    pub include_local_context: bool,
}

impl From<&ParameterSet> for GenerateContext {
    fn from(params: &ParameterSet) -> Self {
        debug!(grade = %params.grade, topic = %params.topic, "GenerateContext::from: called");
        let label = params.learning_object_type.label();
        Self {
            grade: params.grade,
            topic: params.topic.clone(),
            learning_object_type: label.to_string(),
            learning_object_type_lower: label.to_lowercase(),
            scaffolding_level: params.scaffolding_level.label().to_string(),
            blooms_level: params.blooms_level.label().to_string(),
            include_local_context: params.include_local_context,
        }
    }
}

/// Context for the `grade` template
#[derive(Debug, Clone, Serialize)]
pub struct GradeContext<'a> {
    pub text: &'a str,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (from `server.prompts-dir`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `override_dir` before the embedded prompts
    ///
    /// A directory that does not exist is ignored.
    pub fn new(override_dir: Option<&Path>) -> Self {
        debug!(?override_dir, "PromptLoader::new: called");
        let override_dir = override_dir.filter(|d| d.is_dir()).map(Path::to_path_buf);
        if override_dir.is_some() {
            debug!("PromptLoader::new: override directory found");
        } else {
            debug!("PromptLoader::new: no override directory");
        }

        Self {
            hbs: Self::engine(),
            override_dir,
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    // Prompts are plain text, not HTML
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{prompts-dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            } else {
                debug!(?path, "PromptLoader::load_template: not found in override directory");
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context, trimmed
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        info!("Rendering template '{}'", template_name);

        self.hbs
            .render_template(&template, context)
            .map(|rendered| rendered.trim().to_string())
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// System prompt for generation and grading
    pub fn system_prompt(&self) -> Result<String> {
        debug!("PromptLoader::system_prompt: called");
        self.render("system", &serde_json::json!({}))
    }

    /// User prompt asking the model for a learning object
    pub fn generate_prompt(&self, params: &ParameterSet) -> Result<String> {
        debug!("PromptLoader::generate_prompt: called");
        self.render("generate", &GenerateContext::from(params))
    }

    /// User prompt asking the model to score `text`
    pub fn grade_prompt(&self, text: &str) -> Result<String> {
        debug!(text_len = text.len(), "PromptLoader::grade_prompt: called");
        self.render("grade", &GradeContext { text })
    }
}
