//! HTTP Errors
//!
//! Handler-boundary errors. Each renders as an error envelope with the
//! matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use super::envelope::Envelope;
use crate::auth::AuthError;
use crate::exec::ExecError;
use crate::file_storage::FileError;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("method not supported")]
    MethodNotAllowed,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Internal(_) => 500,
        }
    }

    /// Error for an HTTP status code; unknown codes become 500
    pub fn with_status(status: u16, message: String) -> Self {
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            405 => ApiError::MethodNotAllowed,
            _ => ApiError::Internal(message),
        }
    }

    pub fn bad_request_format() -> Self {
        ApiError::BadRequest("bad request format".to_string())
    }

    /// Map a failed singular or list read. Absence becomes 404 with
    /// `not_found`; everything else is a 500.
    pub fn from_read(err: StoreError, not_found: &str) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound(not_found.to_string()),
            StoreError::Decode(_) => {
                error!(error = %err, "row decode failed");
                ApiError::Internal("data scan error".to_string())
            }
            other => {
                error!(error = %other, "store read failed");
                ApiError::Internal("database query error".to_string())
            }
        }
    }

    /// Map a failed write to a 500 carrying `message`
    pub fn from_write(err: StoreError, message: &str) -> Self {
        error!(error = %err, context = message, "store write failed");
        ApiError::Internal(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(Envelope::error(self.to_string()))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err.status_code() {
            500 => {
                error!(error = %err, "login lookup failed");
                ApiError::Internal("login processing error".to_string())
            }
            status => ApiError::with_status(status, err.to_string()),
        }
    }
}

impl From<ExecError> for ApiError {
    fn from(err: ExecError) -> Self {
        match err.status_code() {
            500 => ApiError::Internal(format!("command execution failed: {err}")),
            status => ApiError::with_status(status, err.to_string()),
        }
    }
}

impl From<FileError> for ApiError {
    fn from(err: FileError) -> Self {
        match err.status_code() {
            404 => ApiError::NotFound(format!("cannot open file: {err}")),
            status => ApiError::with_status(status, err.to_string()),
        }
    }
}

/// Fallback for methods a route does not serve
pub async fn method_not_supported() -> ApiError {
    ApiError::MethodNotAllowed
}
