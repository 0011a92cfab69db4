//! # Execution Errors

use thiserror::Error;

/// Result type for command execution
pub type ExecResult<T> = Result<T, ExecError>;

/// Command execution errors
#[derive(Debug, Clone, Error)]
pub enum ExecError {
    /// Execution is switched off by configuration
    #[error("command execution is disabled")]
    Disabled,

    /// The program is not on the configured allow-list
    #[error("command not permitted: {0}")]
    NotPermitted(String),

    /// The shell could not be spawned
    #[error("{0}")]
    Spawn(String),

    /// The command ran and exited unsuccessfully
    #[error("{0}")]
    Failed(String),
}

impl ExecError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ExecError::Disabled => 403,
            ExecError::NotPermitted(_) => 403,
            ExecError::Spawn(_) => 500,
            ExecError::Failed(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExecError::Disabled.status_code(), 403);
        assert_eq!(ExecError::NotPermitted("rm".into()).status_code(), 403);
        assert_eq!(ExecError::Failed("exit status: 1".into()).status_code(), 500);
    }
}
