use crate::error::{NotiError, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Exit status and captured standard output of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Boundary for running package-manager binaries.
///
/// An `Err` means the program could not be run at all; a program that ran and
/// exited non-zero is an `Ok` with the matching status.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands on the host, blocking until each one exits.
#[derive(Debug, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!(program, ?args, "executing");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| {
                NotiError::CommandExecution(format!(
                    "Failed to execute '{} {}': {e}",
                    program,
                    args.join(" ")
                ))
            })?;

        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        };
        debug!(program, status = ?result.status, "command finished");
        Ok(result)
    }
}
