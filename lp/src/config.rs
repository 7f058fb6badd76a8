//! lessonprompt configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the deployment environment for `/api/test-env`
pub const ENVIRONMENT_VAR: &str = "LESSONPROMPT_ENV";

/// Main lessonprompt configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Log level (overridden by --log-level)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that the LLM API key environment variable is set.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key().is_none() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .lessonprompt.yml
        let local_config = PathBuf::from(".lessonprompt.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/lessonprompt/lessonprompt.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("lessonprompt").join("lessonprompt.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Log level from the config file, read before logging is set up
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|config| config.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "openai" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Per-attempt request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Retries after the first attempt on transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts in milliseconds
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            max_tokens: 2000,
            temperature: 0.7,
            timeout_ms: 60_000,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl LlmConfig {
    /// API key from the configured environment variable; empty counts as unset
    pub fn api_key(&self) -> Option<String> {
        debug!(api_key_env = %self.api_key_env, "api_key: called");
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }

    /// Redacted view of the API key for diagnostics
    pub fn api_key_info(&self) -> ApiKeyInfo {
        ApiKeyInfo::from_key(self.api_key().as_deref())
    }
}

/// What diagnostics may reveal about the API key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyInfo {
    pub has_api_key: bool,
    /// First eight characters followed by "..."
    pub api_key_prefix: Option<String>,
    pub key_length: usize,
}

impl ApiKeyInfo {
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(key) => Self {
                has_api_key: true,
                api_key_prefix: Some(format!("{}...", key.chars().take(8).collect::<String>())),
                key_length: key.chars().count(),
            },
            None => Self {
                has_api_key: false,
                api_key_prefix: None,
                key_length: 0,
            },
        }
    }
}

/// Deployment environment name, "development" when unset
pub fn environment() -> String {
    std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string())
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,

    /// Directory of `.pmt` files overriding the embedded prompts
    #[serde(rename = "prompts-dir")]
    pub prompts_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            prompts_dir: None,
        }
    }
}
