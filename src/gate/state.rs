//! Readiness state machine.
//!
//! # States
//! - Waiting: the database has not answered a probe yet
//! - Ready: a probe succeeded; terminal
//!
//! # State Transitions
//! ```text
//! Waiting → Waiting: probe failed (sleep, then probe again)
//! Waiting → Ready:   probe succeeded
//! ```

/// Where the gate currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Still probing; `attempts` probes have failed so far.
    Waiting { attempts: u32 },
    /// The probe succeeded on attempt number `attempts`.
    Ready { attempts: u32 },
}

impl GateState {
    pub fn new() -> Self {
        GateState::Waiting { attempts: 0 }
    }

    /// Number of probes made so far.
    pub fn attempts(&self) -> u32 {
        match *self {
            GateState::Waiting { attempts } | GateState::Ready { attempts } => attempts,
        }
    }

    /// Apply one probe result and return the next state.
    pub fn advance(self, probe_succeeded: bool) -> Self {
        match self {
            GateState::Waiting { attempts } => {
                let attempts = attempts.saturating_add(1);
                if probe_succeeded {
                    GateState::Ready { attempts }
                } else {
                    GateState::Waiting { attempts }
                }
            }
            ready @ GateState::Ready { .. } => ready,
        }
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_self_loop() {
        let state = GateState::new().advance(false).advance(false);
        assert_eq!(state, GateState::Waiting { attempts: 2 });
    }

    #[test]
    fn test_success_transitions_to_ready() {
        let state = GateState::new().advance(false).advance(true);
        assert_eq!(state, GateState::Ready { attempts: 2 });
        assert_eq!(state.attempts(), 2);
    }

    #[test]
    fn test_ready_is_terminal() {
        let ready = GateState::new().advance(true);
        assert_eq!(ready.advance(false), ready);
        assert_eq!(ready.advance(true), ready);
    }
}
