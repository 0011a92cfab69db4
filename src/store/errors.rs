//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A singular read matched no rows
    #[error("Record not found")]
    NotFound,

    /// A row was returned but a column could not be decoded
    #[error("Row decode error: {0}")]
    Decode(String),

    /// Connection, statement or constraint failure
    #[error("Database error: {0}")]
    Database(String),

    /// Database directory could not be prepared
    #[error("I/O error: {0}")]
    Io(String),

    /// The connection mutex was poisoned by a panicking holder
    #[error("Store unavailable")]
    Unavailable,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => StoreError::Decode(err.to_string()),
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
