//! # File Access Errors

use thiserror::Error;

/// Result type for file access
pub type FileResult<T> = Result<T, FileError>;

/// File access errors
#[derive(Debug, Clone, Error)]
pub enum FileError {
    /// The path could not be opened or read; carries the OS error text
    #[error("{0}")]
    Open(String),

    /// The path leaves the configured root
    #[error("path escapes file root: {0}")]
    OutsideRoot(String),
}

impl FileError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            FileError::Open(_) => 404,
            FileError::OutsideRoot(_) => 403,
        }
    }
}

impl From<std::io::Error> for FileError {
    fn from(err: std::io::Error) -> Self {
        FileError::Open(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FileError::Open("missing".into()).status_code(), 404);
        assert_eq!(FileError::OutsideRoot("../x".into()).status_code(), 403);
    }
}
