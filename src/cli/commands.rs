//! CLI command implementations
//!
//! Both commands initialize the store first; a store that cannot be created,
//! opened, migrated or seeded is fatal.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::auth::DigestTokenIssuer;
use crate::exec::ShellExecutor;
use crate::file_storage::LocalFileAccessor;
use crate::http_server::{AppContext, HttpServer};
use crate::store::{store_exists, Store};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main entry point for CLI
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    init_tracing();

    match cmd {
        Command::Init { config } => init(config.as_deref()),
        Command::Serve { config, port } => serve(config.as_deref(), port),
    }
}

/// Install the fmt subscriber, honouring `RUST_LOG` (default `info`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("tracing init failed: {}", e);
    }
}

/// Create the database file, tables and seed rows, then exit
pub fn init(config_path: Option<&Path>) -> CliResult<()> {
    let config = Config::resolve(config_path)?;
    let existed = store_exists(&config.store.db_path);

    open_store(&config)?;

    info!(
        path = %config.store.db_path.display(),
        created = !existed,
        "store initialized"
    );
    Ok(())
}

/// Initialize the store and serve HTTP until terminated
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
        config.validate()?;
    }

    let store = Arc::new(open_store(&config)?);
    let ctx = Arc::new(build_context(store, &config));
    let server = HttpServer::new(config.http.clone(), ctx);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

fn open_store(config: &Config) -> CliResult<Store> {
    Store::initialize(&config.store)
        .map_err(|e| CliError::boot_failed(format!("Store initialization failed: {}", e)))
}

/// Wire the store and the configured capabilities into one handler context
pub fn build_context(store: Arc<Store>, config: &Config) -> AppContext {
    AppContext::new(
        store,
        Arc::new(DigestTokenIssuer::from_config(&config.auth)),
        Arc::new(ShellExecutor::from_config(&config.exec)),
        Arc::new(LocalFileAccessor::from_config(&config.files)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_store_from_config_file() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("state/app.db");
        let config_path = temp.path().join("crudbox.json");
        fs::write(
            &config_path,
            serde_json::json!({ "store": { "db_path": db_path } }).to_string(),
        )
        .unwrap();

        init(Some(config_path.as_path())).unwrap();
        assert!(db_path.is_file());

        // second run finds the seeded store and leaves it alone
        init(Some(config_path.as_path())).unwrap();
    }

    #[test]
    fn test_init_fails_when_store_cannot_open() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("crudbox.json");
        // the database path is an existing directory
        fs::write(
            &config_path,
            serde_json::json!({ "store": { "db_path": temp.path() } }).to_string(),
        )
        .unwrap();

        let err = init(Some(config_path.as_path())).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
    }

    #[test]
    fn test_serve_rejects_zero_port() {
        let err = serve(None, Some(0)).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }
}
