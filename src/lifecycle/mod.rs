//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     .env → config file → DB_* snapshot → logging → gate → handoff
//! ```
//!
//! # Design Decisions
//! - Ordered startup: configuration is complete before the first probe
//! - No signal handling of our own; termination uses default dispositions

pub mod startup;

pub use startup::{run, Startup, StartupError};
