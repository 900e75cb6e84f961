//! Handoff to the wrapped command.
//!
//! # Data Flow
//! ```text
//! gate Ready
//!     → Exec:  replace this process image (PID, stdio, env kept)
//!     → Spawn: run as child with inherited stdio/env, wait, return its code
//! ```
//!
//! # Design Decisions
//! - Exec is the default on Unix; other platforms fall back to Spawn
//! - A successful exec never returns, so only failures surface as errors
//! - A child killed by a signal maps to 128 + signal, as shells report it
//! - A command that cannot start exits 127 (not found) or 126 (not runnable)

pub mod command;

use std::io;

use thiserror::Error;

use crate::config::HandoffMode;

pub use command::TrailingCommand;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("failed to exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl HandoffError {
    /// Exit code a shell would report for the same failure.
    pub fn exit_code(&self) -> i32 {
        let (HandoffError::Exec { source, .. } | HandoffError::Spawn { source, .. }) = self;
        match source.kind() {
            io::ErrorKind::NotFound => 127,
            _ => 126,
        }
    }
}

/// Transfer control to `command`.
///
/// In exec mode this only returns on failure. In spawn mode it returns the
/// exit code the gate should terminate with.
pub async fn hand_off(command: &TrailingCommand, mode: HandoffMode) -> Result<i32, HandoffError> {
    tracing::info!(
        program = %command.program().to_string_lossy(),
        args = command.args().len(),
        mode = ?mode,
        "Handing off to command"
    );

    match mode {
        #[cfg(unix)]
        HandoffMode::Exec => exec(command),
        #[cfg(not(unix))]
        HandoffMode::Exec => {
            tracing::warn!("Process replacement unavailable on this platform, spawning instead");
            spawn_and_wait(command).await
        }
        HandoffMode::Spawn => spawn_and_wait(command).await,
    }
}

#[cfg(unix)]
fn exec(command: &TrailingCommand) -> Result<i32, HandoffError> {
    use std::os::unix::process::CommandExt;

    let source = command.to_command().exec();
    Err(HandoffError::Exec {
        program: command.program().to_string_lossy().into_owned(),
        source,
    })
}

async fn spawn_and_wait(command: &TrailingCommand) -> Result<i32, HandoffError> {
    let program = command.program().to_string_lossy().into_owned();
    let status = tokio::process::Command::from(command.to_command())
        .status()
        .await
        .map_err(|source| HandoffError::Spawn {
            program: program.clone(),
            source,
        })?;

    let code = exit_code(status);
    tracing::info!(program = %program, code, "Command exited");
    Ok(code)
}

fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
