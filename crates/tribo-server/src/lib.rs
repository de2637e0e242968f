//! HTTP front end for the tribo engine
//!
//! Exposes `GET /tribonacci/:n` plus health and statistics endpoints, and
//! runs the server until a shutdown signal arrives. Shutdown cancels every
//! in-flight computation before draining connections.

pub mod error;
pub mod router;
pub mod server;
pub mod shutdown;

pub use error::ApiError;
pub use router::{AppState, StatsResponse, router};
pub use server::TriboServer;
pub use shutdown::shutdown_signal;
