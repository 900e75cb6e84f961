//! Connection parameters sourced from the process environment.
//!
//! The environment is read exactly once at startup. Everything downstream
//! receives a [`ConnectionParams`] by reference and never touches
//! `std::env` again.

use std::fmt;
use std::path::Path;

use thiserror::Error;

pub const HOST_VAR: &str = "DB_HOST";
pub const PORT_VAR: &str = "DB_PORT";
pub const USER_VAR: &str = "DB_USER";
pub const PASSWORD_VAR: &str = "DB_PASSWORD";
pub const NAME_VAR: &str = "DB_NAME";

const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("DB_HOST is not set")]
    MissingHost,

    #[error("DB_PORT is not a valid port: {0:?}")]
    InvalidPort(String),

    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },
}

/// Where to reach the database and how to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    /// Only set from `DB_PORT`; otherwise the client's own default applies.
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl ConnectionParams {
    /// Snapshot the connection parameters from the process environment.
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the parameters from an arbitrary variable lookup.
    ///
    /// Only the host is mandatory. Unset user, password or database name
    /// become empty strings and are left for the probe to reject. An unset
    /// port stays `None` so `PGPORT` keeps working.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(HOST_VAR)
            .filter(|h| !h.is_empty())
            .ok_or(EnvError::MissingHost)?;

        let port = match lookup(PORT_VAR).filter(|p| !p.is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u16>()
                    .map_err(|_| EnvError::InvalidPort(raw))?,
            ),
            None => None,
        };

        Ok(Self {
            host,
            port,
            user: lookup(USER_VAR).unwrap_or_default(),
            password: lookup(PASSWORD_VAR).unwrap_or_default(),
            dbname: lookup(NAME_VAR).unwrap_or_default(),
        })
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .finish()
    }
}

/// Populate the process environment from a `.env` file.
///
/// Variables already present in the environment are never overwritten. An
/// explicit path must exist; without one, `./.env` is picked up when present.
/// Parent directories are never searched.
pub fn load_env_file(path: Option<&Path>) -> Result<(), EnvError> {
    match path {
        Some(path) => apply_env_file(path),
        None => load_default_env_file(Path::new(".")),
    }
}

/// Load `.env` from `dir` if it exists there.
pub fn load_default_env_file(dir: &Path) -> Result<(), EnvError> {
    let path = dir.join(DEFAULT_ENV_FILE);
    if !path.is_file() {
        return Ok(());
    }

    match apply_env_file(&path) {
        Err(EnvError::EnvFile { source, .. }) if source.not_found() => Ok(()),
        other => other,
    }
}

/// Parse the whole file first so a malformed line applies nothing.
fn apply_env_file(path: &Path) -> Result<(), EnvError> {
    let to_env_error = |source| EnvError::EnvFile {
        path: path.display().to_string(),
        source,
    };

    let pairs = dotenvy::from_path_iter(path)
        .map_err(to_env_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_env_error)?;

    for (key, value) in pairs {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(key, value);
        }
    }

    tracing::debug!(path = %path.display(), "Loaded env file");
    Ok(())
}
