//! Command-line interface.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "wait-for-postgres")]
#[command(about = "Wait until PostgreSQL accepts connections, then run a command", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file with probe, retry, handoff and logging settings.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// `.env` file loaded before reading DB_* variables (defaults to ./.env when present).
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Legacy host argument. Accepted and ignored; the host comes from DB_HOST.
    #[arg(value_name = "LEGACY")]
    pub legacy: OsString,

    /// Command and arguments to run once the database is ready.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<OsString>,
}
