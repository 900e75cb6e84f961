//! PostgreSQL readiness gate library.

pub mod cli;
pub mod config;
pub mod gate;
pub mod handoff;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod resilience;

pub use config::{ConnectionParams, GateConfig};
pub use gate::{GateState, Readiness, ReadinessGate};
pub use handoff::TrailingCommand;
pub use probe::{Probe, ProbeOutcome};
