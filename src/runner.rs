//! External command execution
//!
//! Runs the deploy command through the native shell with the child
//! inheriting our stdio. The Salesforce CLI renders deploy progress bars
//! only when its output is a real terminal stream; piping or capturing the
//! output suppresses them, so nothing is buffered here. The log watcher
//! reads the deploy log independently.

use std::process::{Command, Stdio};

use crate::error::{DeployError, DeployResult};

/// Run a command line through the native shell, blocking until it exits.
///
/// A non-zero exit maps to `DeploymentFailed` carrying the child's own code
/// (1 when the child died without one). Deploy commands are not safely
/// re-runnable, so there is no retry here.
pub fn run_shell(command: &str) -> DeployResult<()> {
    let status = shell_command(command)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        return Err(DeployError::DeploymentFailed {
            code: status.code().unwrap_or(1),
        });
    }

    Ok(())
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}
