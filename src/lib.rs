//! Tribo
//!
//! Memoized tribonacci numbers with a shared, size-bounded cache.
//!
//! This crate bundles the engine ([`tribo_core`]) and its HTTP front end
//! ([`tribo_server`]).
//!
//! ```rust
//! use tribo::{RequestContext, Tribo};
//!
//! let tribo = Tribo::new(1_000);
//! let value = tribo.get_blocking(&RequestContext::background(), 7).unwrap();
//! assert_eq!(value.value(), "7");
//! ```

pub use tribo_core::*;

pub mod server {
    pub use tribo_server::*;
}
