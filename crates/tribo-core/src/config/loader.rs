//! Configuration loading from multiple sources

use crate::config::{LogFormat, TriboConfig};
use crate::error::{TriboError, TriboResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of environment variables read by [`ConfigSource::Environment`]
pub const ENV_PREFIX: &str = "TRIBO_";

/// Settings that replace configured values when present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub shutdown_grace_secs: Option<u64>,
    pub cache_size_limit: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl ConfigOverrides {
    /// Read `TRIBO_*` variables from the process environment
    pub fn from_env() -> TriboResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Read overrides from `(name, value)` pairs
    ///
    /// Recognized names: `TRIBO_BIND`, `TRIBO_REQUEST_TIMEOUT_SECS`,
    /// `TRIBO_SHUTDOWN_GRACE_SECS`, `TRIBO_CACHE_SIZE_LIMIT`,
    /// `TRIBO_LOG_LEVEL`, `TRIBO_LOG_FORMAT`. Others are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> TriboResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Self::default();
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();
            match name {
                "BIND" => overrides.bind = Some(value.to_string()),
                "REQUEST_TIMEOUT_SECS" => {
                    overrides.request_timeout_secs = Some(parse_number(key.as_ref(), value)?)
                }
                "SHUTDOWN_GRACE_SECS" => {
                    overrides.shutdown_grace_secs = Some(parse_number(key.as_ref(), value)?)
                }
                "CACHE_SIZE_LIMIT" => {
                    overrides.cache_size_limit = Some(parse_number(key.as_ref(), value)?)
                }
                "LOG_LEVEL" => overrides.log_level = Some(value.to_string()),
                "LOG_FORMAT" => overrides.log_format = Some(value.parse()?),
                _ => {}
            }
        }
        Ok(overrides)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> TriboResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| TriboError::config(format!("Invalid {} value '{}': {}", key, value, e)))
}

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Built-in defaults
    Default,
    /// A TOML (`.toml`) or JSON file
    File(PathBuf),
    /// `TRIBO_*` environment variables
    Environment,
    /// Explicit overrides, typically from command-line flags
    Overrides(ConfigOverrides),
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied in the order they were added; later sources win.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    pub fn with_overrides(self, overrides: ConfigOverrides) -> Self {
        self.add_source(ConfigSource::Overrides(overrides))
    }

    /// Load configuration from all sources and validate the result
    pub fn load(self) -> TriboResult<TriboConfig> {
        let mut config = TriboConfig::default();

        for source in self.sources {
            match source {
                ConfigSource::Default => {
                    tracing::debug!("Loading default config");
                    config = TriboConfig::default();
                }
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config from file: {}", path.display());
                    config = load_from_file(&path)?;
                }
                ConfigSource::Environment => {
                    tracing::debug!("Loading config from environment");
                    config.merge(ConfigOverrides::from_env()?);
                }
                ConfigSource::Overrides(overrides) => {
                    tracing::debug!("Applying config overrides");
                    config.merge(overrides);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Load configuration from a file
///
/// The format follows the extension: `.json` is parsed as JSON, anything else
/// as TOML. Missing fields take their defaults.
pub fn load_from_file(path: &Path) -> TriboResult<TriboConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        TriboError::Io(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            TriboError::Json(format!(
                "Failed to parse JSON config '{}': {}",
                path.display(),
                e
            ))
        })?,
        _ => toml::from_str(&content).map_err(|e| {
            TriboError::config(format!(
                "Failed to parse TOML config '{}': {}",
                path.display(),
                e
            ))
        })?,
    };

    Ok(config)
}
