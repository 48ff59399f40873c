//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::repository::RepositoryError;

const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Request body exceeds the configured limit
    PayloadTooLarge(String),
    /// Store failure. `public_message` is what the caller sees; the source is only logged.
    Repository {
        source: RepositoryError,
        public_message: &'static str,
    },
}

impl AppError {
    /// Wrap a repository error, using `public_message` if it turns out to be a server error.
    pub fn repository(source: RepositoryError, public_message: &'static str) -> Self {
        AppError::Repository {
            source,
            public_message,
        }
    }

    /// Wrap a repository error with a per-operation message for server errors.
    pub fn with_public_message(
        public_message: &'static str,
    ) -> impl FnOnce(RepositoryError) -> AppError {
        move |source| AppError::repository(source, public_message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiError::new("PAYLOAD_TOO_LARGE", msg),
            ),
            AppError::Repository {
                source,
                public_message,
            } => match source {
                RepositoryError::NotFound { ref message, .. } => (
                    StatusCode::NOT_FOUND,
                    ApiError::new("NOT_FOUND", message.clone()),
                ),
                RepositoryError::ValidationError { ref message, .. } => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("BAD_REQUEST", message.clone()),
                ),
                other => {
                    error!(error = %other, "{}", public_message);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("INTERNAL_ERROR", public_message),
                    )
                }
            },
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::repository(err, GENERIC_INTERNAL_MESSAGE)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = format!("Invalid request body: {}", rejection.body_text());
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(message)
        } else {
            AppError::BadRequest(message)
        }
    }
}
