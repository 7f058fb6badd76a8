//! HTTP API
//!
//! Stateless JSON endpoints over the composer, the scorer and the language
//! model. Shared state is read-only after startup.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{Catalog, GradeCatalog, PromptResponse, ScoreResponse};

use crate::config::Config;
use crate::grader::Grader;
use crate::llm::{self, LlmClient, LlmError};
use crate::prompts::PromptLoader;

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: Option<Arc<dyn LlmClient>>,
    pub prompts: Arc<PromptLoader>,
    pub grader: Arc<Grader>,
}

impl AppState {
    pub fn new(config: Config, llm: Option<Arc<dyn LlmClient>>) -> Self {
        debug!(has_llm = llm.is_some(), "AppState::new: called");
        let prompts = Arc::new(PromptLoader::new(config.server.prompts_dir.as_deref()));
        let grader = Arc::new(Grader::new(llm.clone(), prompts.clone()));
        Self {
            config: Arc::new(config),
            llm,
            prompts,
            grader,
        }
    }

    /// Build state from config, creating the LLM client when a key is present
    ///
    /// A missing API key leaves the model-backed routes unavailable rather than
    /// failing startup.
    pub fn from_config(config: Config) -> Result<Self> {
        debug!("AppState::from_config: called");
        let llm = match llm::create_client(&config.llm) {
            Ok(client) => Some(client),
            Err(LlmError::MissingApiKey(var)) => {
                warn!("{} is not set; /api/generate and /api/test-llm will return 503", var);
                None
            }
            Err(e) => return Err(e).context("Failed to create LLM client"),
        };
        Ok(Self::new(config, llm))
    }

    fn require_llm(&self) -> Result<Arc<dyn LlmClient>, ApiError> {
        self.llm.clone().ok_or_else(|| {
            LlmError::MissingApiKey(self.config.llm.api_key_env.clone()).into()
        })
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    debug!("router: called");
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/catalog", get(handlers::catalog))
        .route("/api/compose", post(handlers::compose_prompt))
        .route("/api/generate", post(handlers::generate_prompt))
        .route("/api/score", post(handlers::score))
        .route("/api/test-env", get(handlers::test_env))
        .route("/api/test-llm", get(handlers::test_llm))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

/// Start the HTTP server and run until it stops
pub async fn serve(state: AppState) -> Result<()> {
    let bind = state.config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .context(format!("Failed to bind HTTP listener on {}", bind))?;

    info!("Starting HTTP server on {}", bind);
    axum::serve(listener, router(state)).await.context("HTTP server error")?;
    Ok(())
}
