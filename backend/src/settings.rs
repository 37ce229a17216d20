//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, environment variables (`MONGODB_URL`, `PORT`,
//! ...), and configuration files. `MONGODB_URL` and `PORT` have no default;
//! every other key does. A `.env` file, when present, seeds the environment
//! before settings load; variables already set win.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_OPERATION_TIMEOUT;
use crate::outbound::persistence::StoreConfig;
use crate::outbound::persistence::store::{
    DEFAULT_COLLECTION, DEFAULT_CONNECT_TIMEOUT, DEFAULT_DATABASE,
};

const DEFAULT_HOST: &str = "127.0.0.1";

/// Load environment variables from `path`, or from the nearest `.env` when
/// `path` is `None`. Returns the file that was read.
///
/// # Errors
/// Returns the `dotenvy` error when the file is missing or malformed.
pub fn load_env_file(path: Option<&Path>) -> Result<PathBuf, dotenvy::Error> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    }
}

/// Settings that cannot be turned into a running configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("MONGODB_URL must be set")]
    MissingMongoUrl,
    #[error("PORT must be set")]
    MissingPort,
    #[error("invalid listen address {host}:{port}: {message}")]
    InvalidAddress {
        host: String,
        port: u16,
        message: String,
    },
}

/// Configuration values for the user records server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
pub struct AppSettings {
    /// MongoDB connection URL.
    pub mongodb_url: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// Interface to bind; defaults to loopback.
    pub host: Option<String>,
    /// Database holding the user collection.
    pub database: Option<String>,
    /// Collection of user documents.
    pub collection: Option<String>,
    /// Bound on each request-path store call, in seconds.
    pub operation_timeout_secs: Option<u64>,
    /// Bound on connection setup and the startup ping, in seconds.
    pub connect_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the MongoDB URL.
    ///
    /// # Errors
    /// [`SettingsError::MissingMongoUrl`] when unset or blank.
    pub fn mongodb_url(&self) -> Result<&str, SettingsError> {
        self.mongodb_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingMongoUrl)
    }

    /// Return the socket address to bind.
    ///
    /// # Errors
    /// [`SettingsError::MissingPort`] when no port is configured, or
    /// [`SettingsError::InvalidAddress`] when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let port = self.port.ok_or(SettingsError::MissingPort)?;
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        format!("{host}:{port}")
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidAddress {
                host: host.to_owned(),
                port,
                message: err.to_string(),
            })
    }

    /// Return the configured database name, falling back to the default.
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    /// Return the configured collection name, falling back to the default.
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Per-operation store timeout.
    pub fn operation_timeout(&self) -> Duration {
        self.operation_timeout_secs
            .map_or(DEFAULT_OPERATION_TIMEOUT, Duration::from_secs)
    }

    /// Connection and startup ping timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout_secs
            .map_or(DEFAULT_CONNECT_TIMEOUT, Duration::from_secs)
    }

    /// Build the record store configuration.
    ///
    /// # Errors
    /// [`SettingsError::MissingMongoUrl`] when no URL is configured.
    pub fn store_config(&self) -> Result<StoreConfig, SettingsError> {
        Ok(StoreConfig::new(self.mongodb_url()?)
            .with_database(self.database())
            .with_collection(self.collection())
            .with_connect_timeout(self.connect_timeout()))
    }
}
