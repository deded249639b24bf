//! Real command executor implementation.
//!
//! [`RealCommandExecutor`] executes commands using `std::process::Command`
//! with real-time output streaming on scoped reader threads.

use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result};
use which::which;

use super::pipe::{StreamType, read_pipe_to_log};
use super::{CommandExecutor, CommandSpec, ExecutionResult, format_command_args};
use crate::error::MacforgeError;

/// Command executor that runs actual system commands.
///
/// When `dry_run` is true, commands are logged but not executed,
/// and `execute()` returns `Ok(ExecutionResult { status: None })`.
pub struct RealCommandExecutor {
    pub dry_run: bool,
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        if self.dry_run {
            tracing::info!("dry run: {} {}", spec.command, format_command_args(&spec.args));
            return Ok(ExecutionResult { status: None });
        }

        let cmd =
            which(&spec.command).with_context(|| format!("command not found: {}", spec.command))?;
        tracing::trace!("command found: {}: {}", spec.command, cmd.to_string_lossy());

        let mut command = Command::new(cmd);
        command.args(&spec.args);

        if let Some(ref cwd) = spec.cwd {
            command.current_dir(cwd);
        }

        for (key, value) in &spec.env {
            command.env(key, value);
        }

        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        let mut child = command.spawn().with_context(|| {
            format!("failed to spawn command `{}` with args {:?}", spec.command, spec.args)
        })?;

        tracing::trace!("spawned command: {}: pid={}", spec.command, child.id());

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        // Scoped threads join at the end of the scope, so the readers have
        // drained both pipes by the time the status is returned.
        let status = thread::scope(|scope| {
            scope.spawn(move || read_pipe_to_log(stdout_pipe, StreamType::Stdout));
            scope.spawn(move || read_pipe_to_log(stderr_pipe, StreamType::Stderr));

            child.wait().map_err(|e| MacforgeError::Execution {
                command: format!("{} {}", spec.command, format_command_args(&spec.args)),
                status: format!("failed to wait for command: {}", e),
            })
        })?;

        tracing::trace!("executed command: {}: success={}", spec.command, status.success());

        Ok(ExecutionResult {
            status: Some(status),
        })
    }
}
