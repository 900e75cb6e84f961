//! Readiness probing subsystem.
//!
//! # Data Flow
//! ```text
//! gate loop
//!     → Probe::check(&ConnectionParams)
//!         psql.rs   (spawn client, discard output, read exit status)
//!         native.rs (open a sqlx connection, run the query)
//!     → ProbeOutcome::{Ready, NotReady(cause)}
//! ```
//!
//! # Design Decisions
//! - A probe is an opaque boolean oracle; failure causes are only logged
//! - Probes never return errors: every failure means "not ready yet"
//! - Each attempt is bounded by a timeout so a hung client cannot stall the loop

pub mod native;
pub mod psql;

use std::time::Duration;

use thiserror::Error;

use crate::config::schema::{ProbeConfig, ProbeKind};
use crate::config::ConnectionParams;

pub use native::NativeProbe;
pub use psql::PsqlProbe;

/// Why a single probe attempt did not report ready.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("client exited with status {}", .0.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    ExitStatus(Option<i32>),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to launch client: {0}")]
    Spawn(String),

    #[error("connection failed: {0}")]
    Connect(String),
}

/// Result of one probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Ready,
    NotReady(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProbeOutcome::Ready)
    }
}

/// A readiness oracle for the database.
#[allow(async_fn_in_trait)]
pub trait Probe {
    /// Check once whether the database accepts connections.
    async fn check(&self, params: &ConnectionParams) -> ProbeOutcome;
}

/// The probe selected by configuration.
#[derive(Debug, Clone)]
pub enum AnyProbe {
    Psql(PsqlProbe),
    Native(NativeProbe),
}

impl AnyProbe {
    pub fn from_config(config: &ProbeConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        match config.kind {
            ProbeKind::Psql => AnyProbe::Psql(
                PsqlProbe::new(&config.program, &config.query, timeout)
                    .with_connect_timeout(std::env::var_os("PGCONNECT_TIMEOUT").is_none()),
            ),
            ProbeKind::Native => AnyProbe::Native(NativeProbe::new(&config.query, timeout)),
        }
    }
}

impl Probe for AnyProbe {
    async fn check(&self, params: &ConnectionParams) -> ProbeOutcome {
        match self {
            AnyProbe::Psql(probe) => probe.check(params).await,
            AnyProbe::Native(probe) => probe.check(params).await,
        }
    }
}
