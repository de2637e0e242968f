//! Error types for the tribonacci engine

use thiserror::Error;

/// Result type alias for engine operations
pub type TriboResult<T> = Result<T, TriboError>;

/// Main error type for the engine and its service layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriboError {
    /// The requested index is not a positive integer
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request's cancellation token fired during extension
    #[error("Request was cancelled")]
    Cancelled,

    /// The request's deadline passed during extension
    #[error("Deadline exceeded after {millis} ms")]
    DeadlineExceeded { millis: u64 },

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A config file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// A JSON config file could not be parsed
    #[error("JSON error: {0}")]
    Json(String),
}

impl TriboError {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new deadline error
    pub const fn deadline_exceeded(millis: u64) -> Self {
        Self::DeadlineExceeded { millis }
    }

    /// Whether the error came from the cancellation signal rather than the input
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded { .. })
    }
}
