//! Configuration schema definitions.
//!
//! This module defines the file-level settings for the gate. Every section
//! is defaulted, so an absent or empty file yields the stock behaviour:
//! `psql` probe, fixed 2 second retry, unbounded patience, exec handoff.

use serde::{Deserialize, Serialize};

/// Root configuration for the readiness gate.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Readiness probe settings.
    pub probe: ProbeConfig,

    /// Retry pacing between failed probes.
    pub retry: RetryConfig,

    /// How control is handed to the trailing command.
    pub handoff: HandoffConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Which oracle decides readiness.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    /// Shell out to the `psql` client.
    #[default]
    Psql,
    /// Open a connection in-process with sqlx.
    Native,
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    pub kind: ProbeKind,

    /// Client binary used by the `psql` probe.
    pub program: String,

    /// Statement issued once connected.
    pub query: String,

    /// Upper bound on a single probe attempt in seconds.
    pub timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            kind: ProbeKind::Psql,
            program: "psql".to_string(),
            query: "SELECT 1".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay after the first failed attempt in milliseconds.
    pub interval_ms: u64,

    /// Maximum number of probe attempts. Absent means wait forever.
    pub max_attempts: Option<u32>,

    /// Growth factor applied per failed attempt (1.0 = fixed delay).
    pub multiplier: f64,

    /// Ceiling for the grown delay in milliseconds.
    pub max_interval_ms: u64,

    /// Add up to 10% random jitter to each delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            max_attempts: None,
            multiplier: 1.0,
            max_interval_ms: 30_000,
            jitter: false,
        }
    }
}

/// Handoff strategy once the database is ready.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandoffMode {
    /// Replace the current process image.
    Exec,
    /// Spawn a child, wait for it and exit with its status.
    Spawn,
}

impl Default for HandoffMode {
    fn default() -> Self {
        if cfg!(unix) {
            HandoffMode::Exec
        } else {
            HandoffMode::Spawn
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct HandoffConfig {
    pub mode: HandoffMode,
}

/// Log output encoding.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub level: String,

    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}
