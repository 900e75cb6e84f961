//! Shared utilities for integration testing.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tokio::time::Instant;
use wait_for_postgres::probe::{Probe, ProbeFailure, ProbeOutcome};
use wait_for_postgres::ConnectionParams;

/// One recorded probe invocation.
#[derive(Debug, Clone)]
pub struct ProbeCall {
    pub params: ConnectionParams,
    pub at: Instant,
}

/// A probe that replays scripted outcomes and records what it was given.
///
/// Once the script runs out, every further check reports not ready.
#[derive(Clone)]
pub struct ScriptedProbe {
    script: Rc<RefCell<VecDeque<bool>>>,
    calls: Rc<RefCell<Vec<ProbeCall>>>,
}

impl ScriptedProbe {
    pub fn new(script: &[bool]) -> Self {
        Self {
            script: Rc::new(RefCell::new(script.iter().copied().collect())),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    #[allow(dead_code)]
    pub fn never_ready() -> Self {
        Self::new(&[])
    }

    pub fn calls(&self) -> Vec<ProbeCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Probe for ScriptedProbe {
    async fn check(&self, params: &ConnectionParams) -> ProbeOutcome {
        self.calls.borrow_mut().push(ProbeCall {
            params: params.clone(),
            at: Instant::now(),
        });

        match self.script.borrow_mut().pop_front() {
            Some(true) => ProbeOutcome::Ready,
            _ => ProbeOutcome::NotReady(ProbeFailure::Connect("connection refused".into())),
        }
    }
}

pub fn params() -> ConnectionParams {
    ConnectionParams {
        host: "db.internal".to_string(),
        port: None,
        user: "app_user".to_string(),
        password: "app_password".to_string(),
        dbname: "app_db".to_string(),
    }
}
