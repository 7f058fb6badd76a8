//! HTTP error responses

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lessoncore::{ComposeError, ValidationErrors};
use thiserror::Error;
use tracing::{debug, warn};

use crate::generate::GenerateError;
use crate::llm::LlmError;

/// Errors returned by API handlers
///
/// Every variant renders as `{"error": <summary>, "details": <message>}`;
/// validation failures add a `fields` map.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid parameters")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid request body")]
    BadRequest(String),

    #[error("LLM API is not configured")]
    LlmUnavailable(String),

    #[error("Failed to generate content")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::LlmUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> String {
        match self {
            ApiError::Validation(errors) => errors.to_string(),
            ApiError::BadRequest(msg)
            | ApiError::LlmUnavailable(msg)
            | ApiError::Upstream(msg)
            | ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection, "ApiError::from: json rejection");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ComposeError> for ApiError {
    fn from(err: ComposeError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey(_) => ApiError::LlmUnavailable(err.to_string()),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Llm(e) => e.into(),
            GenerateError::EmptyResponse => ApiError::Upstream(err.to_string()),
            GenerateError::Prompt(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(%status, details = %self.details(), "request failed");
        } else {
            debug!(%status, details = %self.details(), "request rejected");
        }

        let mut body = serde_json::json!({
            "error": self.to_string(),
            "details": self.details(),
        });
        if let ApiError::Validation(errors) = &self {
            body["fields"] = serde_json::json!(errors.fields());
        }
        (status, Json(body)).into_response()
    }
}
