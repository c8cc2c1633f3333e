//! Server settings loaded via OrthoConfig.
//!
//! Values come from `JOBLY_*` environment variables, an optional config file
//! and command-line flags. Unset optional values fall back to the defaults
//! returned by the accessor methods.
//!
//! Boolean toggles are not exposed as CLI flags: a clap `SetTrue` flag always
//! yields `false` when absent, which would mask their defaults and any
//! environment value.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_POOL_MAX_SIZE;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("JOBLY_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address {host}:{port}")]
    InvalidBindAddress { host: String, port: u16 },
}

/// Configuration values for the HTTP server and its database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBLY")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to an ephemeral session key when the key file is missing.
    #[ortho_config(skip_cli, default = false)]
    pub session_allow_ephemeral: bool,
    /// Set the `Secure` flag on the session cookie.
    #[ortho_config(skip_cli, default = true)]
    pub cookie_secure: bool,
    /// Apply pending migrations before serving.
    #[ortho_config(skip_cli, default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Return the database URL or fail when it is not configured.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve host and port into a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.host(), self.port())
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddress {
                host: self.host().to_owned(),
                port: self.port(),
            })
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether a missing key file may be replaced by a generated key.
    ///
    /// Always true in debug builds.
    pub fn session_allow_ephemeral(&self) -> bool {
        cfg!(debug_assertions) || self.session_allow_ephemeral
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations
    }
}
