//! Readiness gate.
//!
//! # Data Flow
//! ```text
//! ConnectionParams + RetryPolicy + Probe
//!     → loop:
//!         probe.check()
//!         → state.rs advance (Waiting → Waiting | Ready)
//!         → on failure: status line, sleep policy delay
//!     → Readiness (attempts, time waited)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: one probe in flight, sleep only after it finishes
//! - Probe failures never escape; only an exhausted attempt ceiling does
//! - The status line goes to an injected writer (stdout in production)

pub mod state;

use std::io::{self, Write};
use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant};

use crate::config::ConnectionParams;
use crate::probe::{Probe, ProbeOutcome};
use crate::resilience::RetryPolicy;

pub use state::GateState;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("database at {host} not ready after {attempts} attempts")]
    Exhausted { host: String, attempts: u32 },

    #[error("failed to write status line: {0}")]
    Status(#[from] io::Error),
}

/// Summary of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    /// Probes made, including the successful one.
    pub attempts: u32,
    /// Time spent from the first probe until readiness.
    pub waited: Duration,
}

/// Blocks until the database answers a probe.
pub struct ReadinessGate<P, W> {
    probe: P,
    params: ConnectionParams,
    policy: RetryPolicy,
    status: W,
    state: GateState,
}

impl<P: Probe, W: Write> ReadinessGate<P, W> {
    pub fn new(probe: P, params: ConnectionParams, policy: RetryPolicy, status: W) -> Self {
        Self {
            probe,
            params,
            policy,
            status,
            state: GateState::new(),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Give back the status writer, e.g. to inspect captured output.
    pub fn into_status(self) -> W {
        self.status
    }

    /// Probe until ready, sleeping the policy delay after each failure.
    pub async fn wait_until_ready(&mut self) -> Result<Readiness, GateError> {
        let started = Instant::now();

        tracing::info!(
            host = %self.params.host,
            port = ?self.params.port,
            dbname = %self.params.dbname,
            "Waiting for database"
        );

        loop {
            let outcome = self.probe.check(&self.params).await;
            self.state = self.state.advance(outcome.is_ready());
            let attempt = self.state.attempts();

            let cause = match outcome {
                ProbeOutcome::Ready => {
                    let readiness = Readiness {
                        attempts: attempt,
                        waited: started.elapsed(),
                    };
                    tracing::info!(
                        host = %self.params.host,
                        attempts = readiness.attempts,
                        waited_ms = readiness.waited.as_millis() as u64,
                        "Database is ready"
                    );
                    return Ok(readiness);
                }
                ProbeOutcome::NotReady(cause) => cause,
            };

            tracing::debug!(
                host = %self.params.host,
                attempt,
                cause = %cause,
                "Probe failed"
            );

            if !self.policy.allows(attempt) {
                tracing::error!(host = %self.params.host, attempts = attempt, "Giving up on database");
                return Err(GateError::Exhausted {
                    host: self.params.host.clone(),
                    attempts: attempt,
                });
            }

            writeln!(self.status, "Waiting for Postgres at {}...", self.params.host)?;
            self.status.flush()?;

            let delay = self.policy.delay_for(attempt);
            tracing::trace!(delay_ms = delay.as_millis() as u64, "Sleeping before next probe");
            time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeFailure;
    use std::cell::Cell;

    /// Fails `failures` times, then reports ready.
    struct CountdownProbe {
        failures: Cell<u32>,
        calls: Cell<u32>,
    }

    impl CountdownProbe {
        fn new(failures: u32) -> Self {
            Self {
                failures: Cell::new(failures),
                calls: Cell::new(0),
            }
        }
    }

    impl Probe for CountdownProbe {
        async fn check(&self, _params: &ConnectionParams) -> ProbeOutcome {
            self.calls.set(self.calls.get() + 1);
            if self.failures.get() == 0 {
                ProbeOutcome::Ready
            } else {
                self.failures.set(self.failures.get() - 1);
                ProbeOutcome::NotReady(ProbeFailure::ExitStatus(Some(2)))
            }
        }
    }

    fn params() -> ConnectionParams {
        ConnectionParams {
            host: "db".to_string(),
            port: None,
            user: "app".to_string(),
            password: "pw".to_string(),
            dbname: "app".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_after_failures() {
        let mut gate = ReadinessGate::new(
            CountdownProbe::new(2),
            params(),
            RetryPolicy::default(),
            Vec::new(),
        );

        let readiness = gate.wait_until_ready().await.unwrap();
        assert_eq!(readiness.attempts, 3);
        assert!(readiness.waited >= Duration::from_secs(4));
        assert_eq!(gate.state(), GateState::Ready { attempts: 3 });
        assert_eq!(gate.probe.calls.get(), 3);

        let output = String::from_utf8(gate.into_status()).unwrap();
        assert_eq!(
            output,
            "Waiting for Postgres at db...\nWaiting for Postgres at db...\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_ceiling_exhausts() {
        let policy = RetryPolicy::default().with_max_attempts(3);
        let mut gate = ReadinessGate::new(CountdownProbe::new(10), params(), policy, Vec::new());

        let err = gate.wait_until_ready().await.unwrap_err();
        assert!(matches!(err, GateError::Exhausted { attempts: 3, .. }));
        assert_eq!(gate.state(), GateState::Waiting { attempts: 3 });

        // No waiting line after the final failed attempt.
        let output = String::from_utf8(gate.into_status()).unwrap();
        assert_eq!(output.lines().count(), 2);
    }
}
