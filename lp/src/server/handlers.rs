//! Route handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lessoncore::{
    BloomsLevel, LearningObjectType, ParameterRequest, ScaffoldingLevel, ScoreColor, ScoreResult, available_grades,
    compose, topics_for_grade,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::AppState;
use super::error::ApiError;
use crate::config::{ApiKeyInfo, environment};
use crate::{generate, llm};

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "ok"
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCatalog {
    pub grade: u8,
    pub topics: Vec<&'static str>,
}

/// Everything a form needs to populate its selectors
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub grades: Vec<GradeCatalog>,
    pub learning_object_types: Vec<&'static str>,
    pub scaffolding_levels: Vec<&'static str>,
    pub blooms_levels: Vec<&'static str>,
}

impl Catalog {
    pub fn build() -> Self {
        debug!("Catalog::build: called");
        Self {
            grades: available_grades()
                .iter()
                .map(|&grade| GradeCatalog {
                    grade,
                    topics: topics_for_grade(grade).unwrap_or_default().to_vec(),
                })
                .collect(),
            learning_object_types: LearningObjectType::ALL.iter().map(|t| t.label()).collect(),
            scaffolding_levels: ScaffoldingLevel::ALL.iter().map(|s| s.label()).collect(),
            blooms_levels: BloomsLevel::ALL.iter().map(|b| b.label()).collect(),
        }
    }
}

pub async fn catalog() -> Json<Catalog> {
    debug!("catalog: called");
    Json(Catalog::build())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptResponse {
    pub prompt: String,
}

/// Compose a prompt locally from the templates
pub async fn compose_prompt(payload: Result<Json<ParameterRequest>, JsonRejection>) -> Result<Json<PromptResponse>, ApiError> {
    debug!("compose_prompt: called");
    let Json(request) = payload?;
    let params = request.validate()?;
    info!(grade = params.grade, topic = %params.topic, object_type = %params.learning_object_type, "composing prompt");
    Ok(Json(PromptResponse {
        prompt: compose(&params),
    }))
}

/// Generate learning material through the language model
pub async fn generate_prompt(
    State(state): State<AppState>,
    payload: Result<Json<ParameterRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    debug!("generate_prompt: called");
    let Json(request) = payload?;
    let params = request.validate()?;
    let llm = state.require_llm()?;

    info!(grade = params.grade, topic = %params.topic, object_type = %params.learning_object_type, "generating via LLM");
    let prompt = generate::generate(llm.as_ref(), &state.prompts, &params, &state.config.llm).await?;
    Ok(Json(PromptResponse { prompt }))
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(alias = "prompt")]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub score: ScoreResult,
    pub color: ScoreColor,
    pub summary: String,
    pub meets_minimum: bool,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(score: ScoreResult) -> Self {
        Self {
            color: score.color(),
            summary: score.summary(),
            meets_minimum: score.meets_minimum(),
            score,
        }
    }
}

/// Score text against the rubric
pub async fn score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, ApiError> {
    debug!("score: called");
    let Json(request) = payload?;
    let result = state.grader.grade(&request.text).await;
    Ok(Json(result.into()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEnvResponse {
    #[serde(flatten)]
    pub api_key: ApiKeyInfo,
    pub environment: String,
}

/// Report whether an API key is configured without revealing it
pub async fn test_env(State(state): State<AppState>) -> Json<TestEnvResponse> {
    debug!("test_env: called");
    Json(TestEnvResponse {
        api_key: state.config.llm.api_key_info(),
        environment: environment(),
    })
}

#[derive(Debug, Serialize)]
pub struct TestLlmResponse {
    pub success: bool,
    pub message: String,
}

/// Round-trip a tiny request to the language model
pub async fn test_llm(State(state): State<AppState>) -> Response {
    debug!("test_llm: called");
    let llm = match state.require_llm() {
        Ok(llm) => llm,
        Err(e) => return e.into_response(),
    };

    match llm::ping(llm.as_ref()).await {
        Ok(message) => Json(TestLlmResponse { success: true, message }).into_response(),
        Err(e) => {
            warn!(error = %e, "test_llm: LLM call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Failed to connect to the LLM API",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
