//! Read-only snapshot of the persisted hosts configuration.
//!
//! The CLI owns the configuration file on disk; this crate only ever sees a
//! parsed snapshot of the `hosts` table, mapping a hostname to the record
//! written at login time. Host order is the document's own order, which
//! [`crate::auth::known_hosts`] relies on.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Configuration snapshot error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Per-host authentication record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    /// Login of the authenticated user
    #[serde(default)]
    pub user: Option<String>,
    /// Persisted OAuth token
    #[serde(default)]
    pub oauth_token: Option<String>,
    /// Preferred git transport for clones and pushes
    #[serde(default)]
    pub git_protocol: Option<GitProtocol>,
}

/// Git transport preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitProtocol {
    /// Clone and push over HTTPS
    Https,
    /// Clone and push over SSH
    Ssh,
}

/// Immutable snapshot of the `hosts` table.
///
/// Backed by an order-preserving TOML table so hosts enumerate in the order
/// they appear in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    hosts: toml::Table,
}

impl Config {
    /// Parse a snapshot from TOML text.
    ///
    /// An empty document is a valid snapshot with no hosts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TomlParse`] when the text is not valid TOML.
    pub fn read_from_string(data: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(data)?;
        debug!(hosts = config.hosts.len(), "parsed hosts snapshot");
        Ok(config)
    }

    /// Configured hostnames, in document order.
    pub fn hosts(&self) -> Vec<&str> {
        self.hosts.keys().map(String::as_str).collect()
    }

    /// The persisted OAuth token for `host`, if any.
    pub fn token_for(&self, host: &str) -> Option<&str> {
        self.hosts
            .get(host)?
            .get("oauth_token")
            .and_then(toml::Value::as_str)
    }

    /// The full record for `host`, if present and well-formed.
    pub fn host(&self, host: &str) -> Option<HostConfig> {
        let value = self.hosts.get(host)?.clone();
        value.try_into().ok()
    }
}
