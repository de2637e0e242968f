//! Request coordination
//!
//! [`Tribo`] answers lookups by index. A lookup is served from the shared
//! [`SequenceStore`] when possible; otherwise it snapshots the store's tail,
//! extends a private copy step by step while polling its [`RequestContext`],
//! and hands the new terms back to the store without waiting for the merge.
//!
//! Concurrent lookups for overlapping ranges are not coalesced. Each one works
//! on its own snapshot, so duplicate work is possible but the store only ever
//! grows by correct terms.
//!
//! # Example
//!
//! ```rust
//! use tribo_core::{RequestContext, Tribo};
//!
//! let tribo = Tribo::new(100_000);
//! let value = tribo.get_blocking(&RequestContext::background(), 10).unwrap();
//! assert_eq!(value.value(), "44");
//! ```

mod stats;

#[cfg(test)]
mod tests;

pub use stats::EngineStatistics;

use crate::cache::SequenceStore;
use crate::config::CacheConfig;
use crate::context::RequestContext;
use crate::error::{TriboError, TriboResult};
use crate::sequence::SequenceExtender;
use crate::types::TriboValue;
use num_bigint::BigUint;
use stats::Counters;
use std::sync::Arc;
use std::thread;
use tracing::{debug, trace, warn};

/// Memoizing tribonacci engine
///
/// Cloning is cheap; clones share the same cache.
#[derive(Debug, Clone)]
pub struct Tribo {
    inner: Arc<EngineInner>,
}

#[derive(Debug)]
struct EngineInner {
    store: SequenceStore,
    counters: Counters,
}

impl Tribo {
    /// Create an engine seeded with `T(1..=3) = 0, 0, 1`
    ///
    /// `cache_size_limit` bounds how many terms the shared cache keeps. A limit
    /// of 3 or less means the cache never grows past the seed; lookups still
    /// succeed but always recompute.
    pub fn new(cache_size_limit: usize) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                store: SequenceStore::new(cache_size_limit),
                counters: Counters::default(),
            }),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.size_limit)
    }

    pub fn cache_size_limit(&self) -> usize {
        self.inner.store.size_limit()
    }

    /// Number of terms currently cached
    pub fn cache_len(&self) -> usize {
        self.inner.store.len()
    }

    pub fn statistics(&self) -> EngineStatistics {
        self.inner.counters.snapshot()
    }

    /// Look up `T(n)`, computing it on the calling thread if needed
    ///
    /// `n` must be positive. Returns [`TriboError::Cancelled`] or
    /// [`TriboError::DeadlineExceeded`] if `ctx` fires before the term is
    /// reached; in that case nothing is merged into the cache.
    pub fn get_blocking(&self, ctx: &RequestContext, n: i64) -> TriboResult<TriboValue> {
        let index = validate_index(n)?;
        if let Some(value) = self.lookup(index) {
            return Ok(value);
        }
        self.compute(ctx, index)
    }

    /// Look up `T(n)`
    ///
    /// Cache hits are answered inline. Misses are computed on tokio's blocking
    /// pool; dropping the returned future cancels that computation at its
    /// next step.
    pub async fn get(&self, ctx: &RequestContext, n: i64) -> TriboResult<TriboValue> {
        let index = validate_index(n)?;
        if let Some(value) = self.lookup(index) {
            return Ok(value);
        }

        let local = ctx.child();
        let _guard = local.token().clone().drop_guard();
        let engine = self.clone();

        match tokio::task::spawn_blocking(move || engine.compute(&local, index)).await {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(_) => Err(TriboError::Cancelled),
        }
    }

    fn lookup(&self, index: usize) -> Option<TriboValue> {
        let value = self.inner.store.try_read(index)?;
        self.inner.counters.record_hit();
        Some(value)
    }

    fn compute(&self, ctx: &RequestContext, index: usize) -> TriboResult<TriboValue> {
        let tail = self.inner.store.snapshot_tail();
        if index <= tail.len() {
            // Another request filled the gap since the fast-path check.
            if let Some(value) = self.lookup(index) {
                return Ok(value);
            }
        }

        self.inner.counters.record_computation();
        debug!(index, cached = tail.len(), "cache miss, extending sequence");

        let mut extender = SequenceExtender::new(tail, self.inner.store.capacity());
        while extender.len() < index {
            if let Err(err) = ctx.check() {
                self.inner.counters.record_cancellation();
                debug!(index, reached = extender.len(), %err, "extension aborted");
                return Err(err);
            }
            extender.step();
        }

        let value = TriboValue::from(extender.current());
        let (base_len, terms) = extender.into_extension();
        self.submit_merge(base_len, terms);
        Ok(value)
    }

    /// Hand an extension to a detached task; the caller never waits on it
    fn submit_merge(&self, base_len: usize, terms: Vec<BigUint>) {
        if terms.is_empty() {
            return;
        }
        self.inner.counters.record_merge();

        let inner = Arc::clone(&self.inner);
        let merge = move || {
            let outcome = inner.store.extend(base_len, terms);
            trace!(base_len, ?outcome, "merged extension");
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { merge() });
            }
            Err(_) => {
                if let Err(err) = thread::Builder::new()
                    .name("tribo-merge".to_string())
                    .spawn(merge)
                {
                    // The terms are simply recomputed by a later request.
                    warn!(%err, "could not start merge thread");
                }
            }
        }
    }
}

fn validate_index(n: i64) -> TriboResult<usize> {
    if n <= 0 {
        return Err(TriboError::invalid_argument(format!(
            "N should be a positive integer, got {}",
            n
        )));
    }
    usize::try_from(n)
        .map_err(|_| TriboError::invalid_argument(format!("N is too large: {}", n)))
}
