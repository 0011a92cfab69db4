//! Configuration file
//!
//! A single JSON document; every section and field is optional and falls
//! back to its documented default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::auth::AuthConfig;
use crate::exec::{ExecConfig, ExecMode};
use crate::file_storage::FileConfig;
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub exec: ExecConfig,

    #[serde(default)]
    pub files: FileConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::parse(&content)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn parse(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> CliResult<()> {
        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.auth.shared_secret.is_empty() {
            return Err(CliError::config_error("auth.shared_secret must not be empty"));
        }

        if self.exec.mode == ExecMode::AllowList && self.exec.allowed_programs.is_empty() {
            return Err(CliError::config_error(
                "exec.allowed_programs must name at least one program in allow_list mode",
            ));
        }

        Ok(())
    }
}
