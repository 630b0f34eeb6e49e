//! # HTTP API Errors
//!
//! Every handler failure is converted into an `ApiError`, which renders as a
//! JSON body with the matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload or path failed field validation
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Name already used by another row
    #[error("{0}")]
    Conflict(String),

    /// Addressed or referenced row does not exist
    #[error("{0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            StorageError::NotFound { .. } | StorageError::ToppingNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            StorageError::Database(ref source) => {
                error!(code = err.code(), error = %source, "Storage failure");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        match err {
            ApiError::Validation(fields) => Self {
                error: "Validation failed".to_string(),
                code,
                fields: Some(fields),
            },
            other => Self {
                error: other.to_string(),
                code,
                fields: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
