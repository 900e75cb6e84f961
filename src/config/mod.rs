//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)
//!     → env.rs (merged into process env, existing vars win)
//!     → env.rs (DB_* snapshot → ConnectionParams)
//!
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GateConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Everything is read once at startup; nothing is re-read mid-loop
//! - All fields have defaults so the file is optional
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::ConnectionParams;
pub use loader::{load_config, ConfigError};
pub use schema::GateConfig;
pub use schema::{HandoffMode, LogFormat, ProbeKind};
