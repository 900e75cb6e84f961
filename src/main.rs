//! wait-for-postgres
//!
//! Blocks until a PostgreSQL server accepts connections, then replaces
//! itself with the given command.
//!
//! # Architecture Overview
//!
//! ```text
//!   argv, env, .env, gate.toml
//!          │
//!          ▼
//!   ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!   │   config    │───▶│    gate     │───▶│   handoff   │───▶ exec(COMMAND...)
//!   │ (once, up   │    │  Waiting ⟲  │    │ exec/spawn  │
//!   │  front)     │    │  → Ready    │    └─────────────┘
//!   └─────────────┘    └──────┬──────┘
//!                             │ check()
//!                             ▼
//!                      ┌─────────────┐
//!                      │    probe    │───▶ psql / sqlx ───▶ PostgreSQL
//!                      └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```text
//! DB_HOST=db DB_USER=app DB_PASSWORD=... DB_NAME=app \
//!     wait-for-postgres db gunicorn app.wsgi
//! ```

use clap::Parser;

use wait_for_postgres::cli::Cli;
use wait_for_postgres::lifecycle::{self, Startup, StartupError};
use wait_for_postgres::observability::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let code = match start(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("wait-for-postgres: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn start(cli: &Cli) -> Result<i32, StartupError> {
    let startup = Startup::prepare(cli)?;
    init_logging(&startup.config.logging);

    tracing::debug!(legacy = ?cli.legacy, "Ignoring legacy host argument");

    lifecycle::run(startup, std::io::stdout()).await
}
