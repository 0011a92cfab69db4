//! # Command Execution
//!
//! Capability-gated shell execution behind the [`CommandExecutor`] trait.

pub mod errors;
pub mod executor;

pub use errors::{ExecError, ExecResult};
pub use executor::{CommandExecutor, CommandPolicy, ExecConfig, ExecMode, ShellExecutor};
