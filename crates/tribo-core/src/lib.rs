//! Tribo Core Library
//!
//! Computes tribonacci numbers by index as decimal strings, memoizing
//! computed prefixes in a shared, size-bounded cache that many concurrent
//! callers can read and extend.

pub mod cache;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod sequence;
pub mod types;

// Re-export commonly used types
pub use cache::{MergeOutcome, SequenceStore};
pub use config::{
    CacheConfig, ConfigLoader, ConfigOverrides, LogFormat, LoggingConfig, ServerConfig,
    TriboConfig,
};
pub use context::RequestContext;
pub use engine::{EngineStatistics, Tribo};
pub use error::{TriboError, TriboResult};
pub use sequence::{SequenceExtender, Tail};
pub use types::TriboValue;

/// Re-exported so callers can build contexts without depending on tokio-util
pub use tokio_util::sync::CancellationToken;
