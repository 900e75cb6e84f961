//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Probe fails:
//!     → backoff.rs (may we try again? how long to sleep?)
//!     → gate sleeps, then probes again
//! ```
//!
//! # Design Decisions
//! - Every probe failure is retryable; causes are only logged
//! - Fixed delay and no ceiling unless configured otherwise

pub mod backoff;

pub use backoff::RetryPolicy;
