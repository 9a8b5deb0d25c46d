//! Run external commands, optionally until they succeed.

use std::path::PathBuf;
use std::process::Command;

use crate::retry::{do_with_retry, Outcome, RetryError, RetryLog, RetryPolicy};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl ShellCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Runs the command to completion and returns its stdout.
/// A non-zero exit is an error carrying stderr.
pub fn run_command(cmd: &ShellCommand) -> Result<String, ShellError> {
    tracing::debug!("running {}", cmd.display());
    let mut command = Command::new(&cmd.program);
    command.args(&cmd.args);
    if let Some(dir) = &cmd.working_dir {
        command.current_dir(dir);
    }
    for (k, v) in &cmd.env {
        command.env(k, v);
    }

    let output = command.output().map_err(|source| ShellError::Spawn {
        program: cmd.program.clone(),
        source,
    })?;

    if !output.status.success() {
        return Err(ShellError::Failed {
            command: cmd.display(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Reruns the command until it exits 0. A program that cannot be started at
/// all fails immediately.
pub fn run_command_with_retry(
    cmd: &ShellCommand,
    policy: &RetryPolicy,
    log: &dyn RetryLog,
) -> Result<String, RetryError<ShellError>> {
    let description = format!("run {}", cmd.display());
    do_with_retry(&description, policy, log, || match run_command(cmd) {
        Ok(stdout) => Outcome::Success(stdout),
        Err(e @ ShellError::Spawn { .. }) => Outcome::Fatal(e),
        Err(e) => Outcome::Retriable(e),
    })
}
