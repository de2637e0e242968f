//! Default values
//!
//! All of these can be overridden via configuration.

/// Default number of terms the shared cache may hold
pub const CACHE_SIZE_LIMIT: usize = 100_000;

/// Default listen address
pub const BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default per-request computation budget (1 minute)
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default grace period for draining connections on shutdown (5 seconds)
pub const SHUTDOWN_GRACE_SECS: u64 = 5;

/// Default log level
pub const LOG_LEVEL: &str = "info";
