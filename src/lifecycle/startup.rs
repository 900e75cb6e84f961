//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the `.env` file, the config file and the DB_* snapshot
//! - Build the probe and retry policy from config
//! - Run the gate, then hand off to the trailing command
//!
//! # Design Decisions
//! - Fail fast: any setup error is fatal before the first probe
//! - Setup is split from the run so logging can be configured in between

use std::io::Write;

use thiserror::Error;

use crate::cli::Cli;
use crate::config::env::{load_env_file, EnvError};
use crate::config::loader::{load_or_default, ConfigError};
use crate::config::{ConnectionParams, GateConfig};
use crate::gate::{GateError, ReadinessGate};
use crate::handoff::{hand_off, HandoffError, TrailingCommand};
use crate::probe::AnyProbe;
use crate::resilience::RetryPolicy;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

impl StartupError {
    /// Process exit code for this failure.
    ///
    /// Handoff failures follow shell conventions; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::Handoff(e) => e.exit_code(),
            _ => 1,
        }
    }
}

/// Everything resolved before the first probe.
#[derive(Debug, Clone)]
pub struct Startup {
    pub config: GateConfig,
    pub params: ConnectionParams,
    pub command: Option<TrailingCommand>,
}

impl Startup {
    /// Resolve settings from the CLI, `.env` file, config file and environment.
    pub fn prepare(cli: &Cli) -> Result<Self, StartupError> {
        load_env_file(cli.env_file.as_deref())?;
        let config = load_or_default(cli.config.as_deref())?;
        let params = ConnectionParams::from_env()?;

        Ok(Self {
            config,
            params,
            command: TrailingCommand::from_args(cli.command.iter().cloned()),
        })
    }
}

/// Wait for the database, then hand off.
///
/// Returns the exit code the process should terminate with. With exec
/// handoff on Unix a successful run never returns.
pub async fn run<W: Write>(startup: Startup, status: W) -> Result<i32, StartupError> {
    let Startup {
        config,
        params,
        command,
    } = startup;

    let probe = AnyProbe::from_config(&config.probe);
    let policy = RetryPolicy::from(&config.retry);

    tracing::debug!(?params, probe = ?config.probe.kind, ?policy, "Starting readiness gate");

    let mut gate = ReadinessGate::new(probe, params, policy, status);
    gate.wait_until_ready().await?;

    match command {
        Some(command) => Ok(hand_off(&command, config.handoff.mode).await?),
        None => {
            tracing::info!("No command given, exiting");
            Ok(0)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::HandoffMode;

    fn startup(probe_program: &str, command: &[&str]) -> Startup {
        let mut config = GateConfig::default();
        config.probe.program = probe_program.to_string();
        config.retry.interval_ms = 10;
        config.retry.max_interval_ms = 10;
        config.retry.max_attempts = Some(2);
        config.handoff.mode = HandoffMode::Spawn;

        Startup {
            config,
            params: ConnectionParams {
                host: "db".to_string(),
                port: None,
                user: "app".to_string(),
                password: "pw".to_string(),
                dbname: "app".to_string(),
            },
            command: TrailingCommand::from_args(command.iter().copied()),
        }
    }

    #[tokio::test]
    async fn test_ready_then_spawned_command_code() {
        let code = run(startup("true", &["sh", "-c", "exit 7"]), Vec::new()).await.unwrap();
        assert_eq!(code, 7);
    }

    #[tokio::test]
    async fn test_unknown_command_maps_to_127() {
        let mut startup = startup("true", &["/nonexistent/definitely-not-here"]);
        startup.config.handoff.mode = HandoffMode::Exec;

        let err = run(startup, Vec::new()).await.unwrap_err();
        assert!(matches!(err, StartupError::Handoff(_)));
        assert_eq!(err.exit_code(), 127);
    }

    #[tokio::test]
    async fn test_no_command_exits_zero() {
        assert_eq!(run(startup("true", &[]), Vec::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_ceiling_is_error() {
        let err = run(startup("false", &["true"]), Vec::new()).await.unwrap_err();
        assert!(matches!(err, StartupError::Gate(GateError::Exhausted { attempts: 2, .. })));
        assert_eq!(err.exit_code(), 1);
    }
}
