//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, probe, gate, handoff
//!     → tracing events (host, attempt, cause, delay_ms, program)
//!     → logging.rs subscriber
//!     → stderr (text or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
