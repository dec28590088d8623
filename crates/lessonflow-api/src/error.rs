use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lessonflow_graph::FlowError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::users::UserStoreError;

pub const MODEL_NOT_CONFIGURED: &str = "AI model is not configured correctly.";
pub const UPSTREAM_FAILURE: &str = "An error occurred with the AI service.";
pub const INTERNAL_FAILURE: &str = "An internal error occurred.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{}", MODEL_NOT_CONFIGURED)]
    ModelNotConfigured,

    #[error("AI service error: {0:#}")]
    Upstream(#[source] anyhow::Error),

    #[error("Lesson flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::AlreadyExists => {
                ApiError::BadRequest(UserStoreError::AlreadyExists.to_string())
            }
            UserStoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::ModelNotConfigured => {
                tracing::error!("AI endpoint called without OPENAI_API_KEY");
                (StatusCode::INTERNAL_SERVER_ERROR, MODEL_NOT_CONFIGURED.to_string())
            }
            ApiError::Upstream(ref e) => {
                tracing::error!("AI service error: {:#}", e);
                (StatusCode::BAD_GATEWAY, UPSTREAM_FAILURE.to_string())
            }
            ApiError::Flow(ref e) => flow_status(e),
            ApiError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_FAILURE.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

fn flow_status(error: &FlowError) -> (StatusCode, String) {
    match error {
        FlowError::EmptyQuery => (StatusCode::BAD_REQUEST, "Topic is required".to_string()),
        FlowError::Timeout(_) => {
            tracing::error!("Lesson flow error: {}", error);
            (StatusCode::GATEWAY_TIMEOUT, "Lesson flow timed out".to_string())
        }
        e if e.is_collaborator_failure() => {
            tracing::error!("Lesson flow error: {}", e);
            (StatusCode::BAD_GATEWAY, UPSTREAM_FAILURE.to_string())
        }
        _ => {
            tracing::error!("Lesson flow error: {}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, "Processing error".to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
