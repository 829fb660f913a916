//! Synchronous shell command execution.
use anyhow::{Context as _, Result, bail};
use std::process::{Command, Output};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// A successful result carrying `stdout`. Used by test doubles.
    #[must_use]
    pub fn ok(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Runs shell commands on behalf of the installer.
///
/// Commands are plain strings handed to `bash -c`, so pipes such as
/// `wget -O - … | sh` work unchanged. Tests substitute a recording double.
#[cfg_attr(test, mockall::automock)]
pub trait Executor: Send + Sync {
    /// Run `command` in a subshell. Fails on spawn failure or non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be started or the command exits
    /// with a non-zero status.
    fn run(&self, command: &str) -> Result<ExecResult>;

    /// Run `command` in a subshell, returning the result even on non-zero exit.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell cannot be started.
    fn run_unchecked(&self, command: &str) -> Result<ExecResult>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// Quote `arg` for inclusion in a `bash -c` command line.
///
/// Words made only of characters that are never special to the shell are
/// returned unchanged so logged commands stay readable.
#[must_use]
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// [`Executor`] backed by real `bash` subprocesses.
///
/// Commands are not logged here; [`Context::sh`](crate::tasks::Context::sh)
/// records them before delegating.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

fn shell(command: &str) -> Command {
    let mut cmd = Command::new("bash");
    cmd.args(["-c", command]);
    cmd
}

/// Execute a command and return the result, bailing on non-zero exit.
fn execute_checked(mut cmd: Command, label: &str) -> Result<ExecResult> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to execute: {label}"))?;
    let result = ExecResult::from(output);
    if !result.success {
        bail!(
            "{label} failed (exit {}): {}",
            result.code.unwrap_or(-1),
            result.stderr.trim()
        );
    }
    Ok(result)
}

impl Executor for SystemExecutor {
    fn run(&self, command: &str) -> Result<ExecResult> {
        execute_checked(shell(command), command)
    }

    fn run_unchecked(&self, command: &str) -> Result<ExecResult> {
        let output = shell(command)
            .output()
            .with_context(|| format!("failed to execute: {command}"))?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
