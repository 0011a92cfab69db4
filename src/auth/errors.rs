//! # Auth Errors
//!
//! Error types for the login flow.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// No stored user matched the username/password pair
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The credential lookup itself failed
    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 401,
            AuthError::Storage(_) => 500,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AuthError::InvalidCredentials,
            other => AuthError::Storage(other),
        }
    }
}
