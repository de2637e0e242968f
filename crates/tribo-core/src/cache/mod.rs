//! Memoization of computed terms
//!
//! The cache is a single ordered sequence shared by every request. Requests
//! read from it, snapshot its tail, and fold their private extensions back in;
//! none of them ever runs the recurrence while holding its lock.

pub mod store;


pub use store::{MergeOutcome, SequenceStore};
