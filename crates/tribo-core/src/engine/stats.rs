//! Engine counters

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatistics {
    /// Requests answered straight from the cache
    pub fast_hits: u64,
    /// Requests that had to extend the sequence
    pub computations: u64,
    /// Extensions aborted by cancellation or deadline
    pub cancellations: u64,
    /// Extensions handed off for merging into the cache
    pub merges_submitted: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    fast_hits: AtomicU64,
    computations: AtomicU64,
    cancellations: AtomicU64,
    merges_submitted: AtomicU64,
}

impl Counters {
    pub(crate) fn record_hit(&self) {
        self.fast_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_computation(&self) {
        self.computations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cancellation(&self) {
        self.cancellations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_merge(&self) {
        self.merges_submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> EngineStatistics {
        EngineStatistics {
            fast_hits: self.fast_hits.load(Ordering::Relaxed),
            computations: self.computations.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
            merges_submitted: self.merges_submitted.load(Ordering::Relaxed),
        }
    }
}
