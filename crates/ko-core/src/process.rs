//! External process execution
//!
//! Thin wrapper around `tokio::process` used for shelling out to git,
//! gradle and friends. Output is captured with stdout and stderr combined,
//! and every invocation is bounded by a timeout: a process that outlives it
//! is left running while the caller proceeds, treating the invocation as
//! failed rather than hanging indefinitely.

use std::{path::Path, time::Duration};

use tokio::process::Command;

use crate::{Error, Result};

/// Captured result of an external process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code; `None` when the process timed out or was killed by a signal
    pub code: Option<i32>,
    /// Combined stdout and stderr
    pub output: String,
}

impl ExecOutput {
    /// Whether the process terminated with a zero exit code.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The combined output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.output.lines().map(str::to_string).collect()
    }
}

/// Executes `program` with `args`, waiting for it to finish.
///
/// # Errors
///
/// Returns [`Error::Command`] when the process cannot be started at all.
/// A timeout is not an error; it yields an [`ExecOutput`] without an exit
/// code.
pub async fn run(
    program: &str,
    args: &[&str],
    working_dir: Option<&Path>,
    timeout: Duration,
) -> Result<ExecOutput> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = working_dir {
        command.current_dir(dir);
    }

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(result) => result.map_err(|e| Error::command(program, e.to_string()))?,
        Err(_) => {
            tracing::warn!(
                "The process ({program}) is taking longer than {}s, giving up on it",
                timeout.as_secs()
            );
            return Ok(ExecOutput::default());
        }
    };

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(ExecOutput {
        code: output.status.code(),
        output: combined,
    })
}

/// Executes `program` with `args`, returning the combined output as lines.
///
/// # Errors
///
/// See [`run`].
pub async fn run_lines(
    program: &str,
    args: &[&str],
    working_dir: Option<&Path>,
    timeout: Duration,
) -> Result<Vec<String>> {
    run(program, args, working_dir, timeout)
        .await
        .map(|output| output.lines())
}

/// Whether an external tool can be found on the `PATH`.
#[must_use]
pub fn is_tool_available(name: &str) -> bool {
    which::which(name).is_ok()
}
