//! Probe that shells out to the `psql` command-line client.
//!
//! The client runs non-interactively (`-w` never prompts for a password,
//! `-X` skips `.psqlrc`) with the password passed through `PGPASSWORD`.
//! Its output is discarded; only the exit status matters.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time;

use crate::config::ConnectionParams;
use crate::probe::{Probe, ProbeFailure, ProbeOutcome};

#[derive(Debug, Clone)]
pub struct PsqlProbe {
    program: String,
    query: String,
    timeout: Duration,
    set_connect_timeout: bool,
}

impl PsqlProbe {
    pub fn new(program: &str, query: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            query: query.to_string(),
            timeout,
            set_connect_timeout: true,
        }
    }

    /// Control whether `PGCONNECT_TIMEOUT` is derived from the probe timeout.
    ///
    /// Turned off when the operator already exported their own value.
    pub fn with_connect_timeout(mut self, enabled: bool) -> Self {
        self.set_connect_timeout = enabled;
        self
    }

    /// Build the client invocation for one attempt.
    pub fn build_command(&self, params: &ConnectionParams) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-h").arg(&params.host);
        if let Some(port) = params.port {
            command.arg("-p").arg(port.to_string());
        }
        command
            .arg("-U")
            .arg(&params.user)
            .arg("-d")
            .arg(&params.dbname)
            .args(["-w", "-X", "-q", "-c"])
            .arg(&self.query)
            .env("PGPASSWORD", &params.password)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if self.set_connect_timeout {
            command.env("PGCONNECT_TIMEOUT", self.timeout.as_secs().max(1).to_string());
        }
        command
    }
}

impl Probe for PsqlProbe {
    async fn check(&self, params: &ConnectionParams) -> ProbeOutcome {
        let mut command = self.build_command(params);

        // Dropping the status future on timeout kills the client.
        match time::timeout(self.timeout, command.status()).await {
            Ok(Ok(status)) if status.success() => ProbeOutcome::Ready,
            Ok(Ok(status)) => ProbeOutcome::NotReady(ProbeFailure::ExitStatus(status.code())),
            Ok(Err(e)) => {
                tracing::debug!(program = %self.program, error = %e, "Failed to spawn probe client");
                ProbeOutcome::NotReady(ProbeFailure::Spawn(e.to_string()))
            }
            Err(_) => ProbeOutcome::NotReady(ProbeFailure::Timeout(self.timeout)),
        }
    }
}
