//! In-process probe using a sqlx connection.
//!
//! Useful in images that ship without the `psql` client. The connection is
//! opened, the query run through the simple-query protocol, and the
//! connection closed again on every attempt.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{Connection, Executor};
use tokio::time;

use crate::config::ConnectionParams;
use crate::probe::{Probe, ProbeFailure, ProbeOutcome};

#[derive(Debug, Clone)]
pub struct NativeProbe {
    query: String,
    timeout: Duration,
}

impl NativeProbe {
    pub fn new(query: &str, timeout: Duration) -> Self {
        Self {
            query: query.to_string(),
            timeout,
        }
    }

    /// Map connection parameters onto sqlx options.
    ///
    /// Empty values and an unset port are left to libpq-style defaults
    /// (`PGUSER`, `PGPORT` and friends) instead of being overridden.
    pub fn connect_options(params: &ConnectionParams) -> PgConnectOptions {
        let mut options = PgConnectOptions::new().host(&params.host);
        if let Some(port) = params.port {
            options = options.port(port);
        }
        if !params.user.is_empty() {
            options = options.username(&params.user);
        }
        if !params.password.is_empty() {
            options = options.password(&params.password);
        }
        if !params.dbname.is_empty() {
            options = options.database(&params.dbname);
        }
        options
    }

    async fn connect_and_query(&self, options: &PgConnectOptions) -> Result<(), sqlx::Error> {
        let mut conn = PgConnection::connect_with(options).await?;
        conn.execute(self.query.as_str()).await?;
        conn.close().await
    }
}

impl Probe for NativeProbe {
    async fn check(&self, params: &ConnectionParams) -> ProbeOutcome {
        let options = Self::connect_options(params);

        match time::timeout(self.timeout, self.connect_and_query(&options)).await {
            Ok(Ok(())) => ProbeOutcome::Ready,
            Ok(Err(e)) => ProbeOutcome::NotReady(ProbeFailure::Connect(e.to_string())),
            Err(_) => ProbeOutcome::NotReady(ProbeFailure::Timeout(self.timeout)),
        }
    }
}
