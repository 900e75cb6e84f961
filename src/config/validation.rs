//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, timeout > 0, multiplier >= 1)
//! - Reject settings that would turn the wait loop into a busy loop
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::GateConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("retry.interval_ms must be greater than zero")]
    ZeroInterval,

    #[error("retry.max_attempts must be at least 1 when set")]
    ZeroMaxAttempts,

    #[error("retry.multiplier must be a finite value >= 1.0, got {0}")]
    InvalidMultiplier(f64),

    #[error("retry.max_interval_ms ({max}) is below retry.interval_ms ({interval})")]
    MaxIntervalBelowInterval { interval: u64, max: u64 },

    #[error("probe.timeout_secs must be greater than zero")]
    ZeroProbeTimeout,

    #[error("probe.program must not be empty")]
    EmptyProgram,

    #[error("probe.query must not be empty")]
    EmptyQuery,
}

/// Check a deserialized config for values serde cannot reject on its own.
pub fn validate_config(config: &GateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let retry = &config.retry;
    if retry.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }
    if retry.max_attempts == Some(0) {
        errors.push(ValidationError::ZeroMaxAttempts);
    }
    if !retry.multiplier.is_finite() || retry.multiplier < 1.0 {
        errors.push(ValidationError::InvalidMultiplier(retry.multiplier));
    }
    if retry.max_interval_ms < retry.interval_ms {
        errors.push(ValidationError::MaxIntervalBelowInterval {
            interval: retry.interval_ms,
            max: retry.max_interval_ms,
        });
    }

    let probe = &config.probe;
    if probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }
    if probe.program.trim().is_empty() {
        errors.push(ValidationError::EmptyProgram);
    }
    if probe.query.trim().is_empty() {
        errors.push(ValidationError::EmptyQuery);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
