//! Logging configuration

use crate::config::defaults;
use crate::error::TriboError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl FromStr for LogFormat {
    type Err = TriboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(TriboError::config(format!(
                "Unknown log format '{}' (expected pretty, json or compact)",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
            Self::Compact => "compact",
        };
        f.write_str(name)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) or comma-separated
    /// `target=level` directives; `RUST_LOG` takes precedence
    pub level: String,
    /// Log format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Check the level against the directive syntax the subscriber accepts
    ///
    /// A directive without `=` must be a bare level; a bare target name is
    /// rejected as a likely typo.
    pub(crate) fn validate(&self) -> Result<(), TriboError> {
        let directives: Vec<&str> = self
            .level
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .collect();
        if directives.is_empty() {
            return Err(TriboError::config("Log level must not be empty"));
        }

        for directive in directives {
            let level = match directive.rsplit_once('=') {
                Some((target, level)) if !target.trim().is_empty() => level.trim(),
                Some(_) => {
                    return Err(TriboError::config(format!(
                        "Log directive '{}' has no target",
                        directive
                    )));
                }
                None => directive,
            };
            if LevelFilter::from_str(level).is_err() {
                return Err(TriboError::config(format!(
                    "Unknown log level '{}' in '{}'",
                    level, self.level
                )));
            }
        }
        Ok(())
    }
}
