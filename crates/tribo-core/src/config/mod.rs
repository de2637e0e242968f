//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML or JSON
//! file, then `TRIBO_*` environment variables, then command-line overrides.

pub mod defaults;
pub mod loader;
mod logging_config;

pub use loader::{ConfigLoader, ConfigOverrides, ConfigSource};
pub use logging_config::{LogFormat, LoggingConfig};

use crate::error::{TriboError, TriboResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriboConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,
    /// Computation budget for a single request, in seconds
    pub request_timeout_secs: u64,
    /// How long to wait for open connections after a shutdown signal
    pub shutdown_grace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::BIND_ADDRESS.to_string(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
            shutdown_grace_secs: defaults::SHUTDOWN_GRACE_SECS,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> TriboResult<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| TriboError::config(format!("Invalid bind address '{}': {}", self.bind, e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

/// Cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of terms kept in the shared cache
    pub size_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_limit: defaults::CACHE_SIZE_LIMIT,
        }
    }
}

impl TriboConfig {
    /// Apply the non-empty fields of `overrides`
    pub fn merge(&mut self, overrides: ConfigOverrides) {
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.server.request_timeout_secs = secs;
        }
        if let Some(secs) = overrides.shutdown_grace_secs {
            self.server.shutdown_grace_secs = secs;
        }
        if let Some(limit) = overrides.cache_size_limit {
            self.cache.size_limit = limit;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    /// Reject settings the server cannot run with
    ///
    /// A cache limit at or below the seed length is allowed; it only disables
    /// cache growth.
    pub fn validate(&self) -> TriboResult<()> {
        self.server.bind_addr()?;
        if self.server.request_timeout_secs == 0 {
            return Err(TriboError::config("request_timeout_secs must be positive"));
        }
        if self.server.shutdown_grace_secs == 0 {
            return Err(TriboError::config("shutdown_grace_secs must be positive"));
        }
        self.logging.validate()?;
        if self.cache.size_limit <= crate::sequence::WINDOW {
            tracing::warn!(
                size_limit = self.cache.size_limit,
                "cache size limit does not exceed the seed; the cache will never grow"
            );
        }
        Ok(())
    }
}
