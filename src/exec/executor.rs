//! # Command Executor
//!
//! Runs caller-supplied command lines through `sh -c`. What may run is decided
//! by a [`CommandPolicy`]; the default policy lets everything through, with no
//! sandbox and no timeout.

use std::io::{self, Read};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::errors::{ExecError, ExecResult};

/// Characters that let one shell line start another command.
const SHELL_CONTROL: &[char] = &[';', '|', '&', '$', '`', '>', '<', '\n', '(', ')'];

/// Executes a command line and returns its combined output
pub trait CommandExecutor: Send + Sync + std::fmt::Debug {
    fn execute(&self, command: &str) -> ExecResult<String>;
}

/// Gate applied before a command reaches the shell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecMode {
    #[default]
    Unrestricted,
    Disabled,
    AllowList,
}

/// Execution configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecConfig {
    /// Gate mode (default: unrestricted)
    #[serde(default)]
    pub mode: ExecMode,

    /// Programs accepted in allow-list mode, matched against the first word
    #[serde(default)]
    pub allowed_programs: Vec<String>,
}

/// Resolved gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandPolicy {
    Unrestricted,
    Disabled,
    AllowList(Vec<String>),
}

impl CommandPolicy {
    pub fn from_config(config: &ExecConfig) -> Self {
        match config.mode {
            ExecMode::Unrestricted => CommandPolicy::Unrestricted,
            ExecMode::Disabled => CommandPolicy::Disabled,
            ExecMode::AllowList => CommandPolicy::AllowList(config.allowed_programs.clone()),
        }
    }

    /// Reject the command if the policy does not admit it.
    ///
    /// Allow-list mode also refuses shell control characters, otherwise an
    /// allowed program could chain any other.
    pub fn check(&self, command: &str) -> ExecResult<()> {
        match self {
            CommandPolicy::Unrestricted => Ok(()),
            CommandPolicy::Disabled => Err(ExecError::Disabled),
            CommandPolicy::AllowList(programs) => {
                let program = command.split_whitespace().next().unwrap_or_default();
                if command.contains(SHELL_CONTROL) || !programs.iter().any(|p| p == program) {
                    return Err(ExecError::NotPermitted(program.to_string()));
                }
                Ok(())
            }
        }
    }
}

/// `sh -c` executor
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    policy: CommandPolicy,
}

impl ShellExecutor {
    pub fn new(policy: CommandPolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &ExecConfig) -> Self {
        Self::new(CommandPolicy::from_config(config))
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> ExecResult<String> {
        if let Err(e) = self.policy.check(command) {
            warn!(command, error = %e, "command rejected by policy");
            return Err(e);
        }

        info!(command, "executing shell command");
        let (output, status) = run_combined(command).map_err(|e| ExecError::Spawn(e.to_string()))?;

        if !status.success() {
            return Err(ExecError::Failed(status.to_string()));
        }

        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

/// Run `sh -c command` with stdout and stderr on one pipe, so the output
/// keeps the order it was written in.
fn run_combined(command: &str) -> io::Result<(Vec<u8>, std::process::ExitStatus)> {
    let (mut reader, writer) = io::pipe()?;

    let mut shell = Command::new("sh");
    shell
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);
    let mut child = shell.spawn()?;
    // the parent's copies of the write end must close for the read to end
    drop(shell);

    let mut output = Vec::new();
    reader.read_to_end(&mut output)?;
    let status = child.wait()?;

    Ok((output, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_runs_command() {
        let executor = ShellExecutor::new(CommandPolicy::Unrestricted);
        let output = executor.execute("echo hello").unwrap();
        assert_eq!(output, "hello\n");
    }

    #[test]
    fn test_output_includes_stderr() {
        let executor = ShellExecutor::new(CommandPolicy::Unrestricted);
        let output = executor.execute("echo out; echo err 1>&2").unwrap();
        assert!(output.contains("out"));
        assert!(output.contains("err"));
    }

    #[test]
    fn test_output_keeps_write_order() {
        let executor = ShellExecutor::new(CommandPolicy::Unrestricted);
        let output = executor.execute("echo first 1>&2; echo second").unwrap();
        assert_eq!(output, "first\nsecond\n");
    }

    #[test]
    fn test_nonzero_exit_is_failure() {
        let executor = ShellExecutor::new(CommandPolicy::Unrestricted);
        let err = executor.execute("exit 3").unwrap_err();
        assert!(matches!(err, ExecError::Failed(_)));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_disabled_policy() {
        let executor = ShellExecutor::new(CommandPolicy::Disabled);
        assert!(matches!(
            executor.execute("echo hi"),
            Err(ExecError::Disabled)
        ));
    }

    #[test]
    fn test_allow_list_policy() {
        let policy = CommandPolicy::AllowList(vec!["echo".to_string()]);
        assert!(policy.check("echo hi").is_ok());
        assert!(matches!(policy.check("ls /"), Err(ExecError::NotPermitted(_))));
        assert!(matches!(
            policy.check("echo hi; cat /etc/passwd"),
            Err(ExecError::NotPermitted(_))
        ));
        assert!(policy.check("").is_err());
    }

    #[test]
    fn test_config_defaults_to_unrestricted() {
        let config: ExecConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(CommandPolicy::from_config(&config), CommandPolicy::Unrestricted);
    }
}
