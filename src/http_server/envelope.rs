//! Response Envelope
//!
//! Every JSON route answers with `{status, message, data?}`. Errors never
//! carry `data`; successes always carry a non-empty message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Uniform JSON response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Success envelope with an optional payload
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "success envelopes need a message");
        Self {
            status: Status::Success,
            message,
            data,
        }
    }

    /// Error envelope; never has a payload
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            data: None,
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Serialize `data` into a 200 success envelope
pub fn ok<T: Serialize>(message: &str, data: T) -> ApiResult<Envelope> {
    let value = serde_json::to_value(data)
        .map_err(|e| ApiError::Internal(format!("response encoding error: {e}")))?;
    Ok(Envelope::success(message, Some(value)))
}
