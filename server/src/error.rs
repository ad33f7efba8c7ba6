//! Error types for the todo service.
//!
//! # Design
//! `TodoError` is what the repository and usecase layers return. `ApiError`
//! lives at the HTTP edge and owns the status-code mapping; handlers convert
//! with `?`. The message of the underlying cause is kept verbatim so clients
//! see e.g. "todo with ID 7 not found".

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::TodoId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("todo with ID {0} not found")]
    NotFound(TodoId),

    #[error("{0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors rendered as HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed id, malformed body or missing required field.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code carried in the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::NotFound(_) => ApiError::NotFound(e.to_string()),
            TodoError::Validation(msg) => ApiError::Validation(msg),
            TodoError::Internal(_) => {
                tracing::error!(error = %e, "internal failure");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            status: "error",
            error: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
