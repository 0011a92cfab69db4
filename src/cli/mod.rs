//! CLI module for crudbox
//!
//! Provides command-line interface for:
//! - init: Create and seed the store
//! - serve: Boot the store and run the HTTP API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{build_context, init, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
