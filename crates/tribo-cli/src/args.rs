//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tribo_core::{ConfigOverrides, LogFormat};

#[derive(Parser, Debug)]
#[command(name = "tribo")]
#[command(about = "Tribo - memoized tribonacci numbers over HTTP")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML or JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format: pretty, json or compact
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server until SIGINT or SIGTERM
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,

        /// Maximum number of terms kept in the shared cache
        #[arg(long)]
        cache_size_limit: Option<usize>,

        /// Per-request computation budget in seconds
        #[arg(long)]
        request_timeout: Option<u64>,

        /// Seconds to wait for open connections after a shutdown signal
        #[arg(long)]
        shutdown_grace: Option<u64>,
    },

    /// Compute a single term and print it
    Get {
        /// 1-based index of the term
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Computation budget in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum number of terms kept in the cache
        #[arg(long)]
        cache_size_limit: Option<usize>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
}

impl Cli {
    /// Flags that override file and environment settings
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides {
            log_level: self.log_level.clone(),
            log_format: self.log_format,
            ..Default::default()
        };

        match &self.command {
            Commands::Serve {
                bind,
                cache_size_limit,
                request_timeout,
                shutdown_grace,
            } => {
                overrides.bind = bind.clone();
                overrides.cache_size_limit = *cache_size_limit;
                overrides.request_timeout_secs = *request_timeout;
                overrides.shutdown_grace_secs = *shutdown_grace;
            }
            Commands::Get {
                timeout,
                cache_size_limit,
                ..
            } => {
                overrides.request_timeout_secs = *timeout;
                overrides.cache_size_limit = *cache_size_limit;
            }
            Commands::Config { .. } => {}
        }
        overrides
    }
}
