//! Shared, size-bounded store of computed terms

use crate::sequence::{SEED, Tail, WINDOW};
use crate::types::TriboValue;
use num_bigint::BigUint;
use parking_lot::Mutex;

/// Outcome of folding a candidate extension into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// `count` new terms were appended
    Appended { count: usize },
    /// The store already covered everything the candidate offered
    AlreadyCovered,
    /// The store is at its size limit
    AtCapacity,
    /// The candidate starts past the end of the store
    Gap { store_len: usize, base_len: usize },
}

/// Authoritative, append-only tribonacci sequence
///
/// Every operation takes the lock for its own duration only. The store is
/// seeded by its constructor, so it always holds at least [`WINDOW`] terms.
#[derive(Debug)]
pub struct SequenceStore {
    terms: Mutex<Vec<BigUint>>,
    size_limit: usize,
}

impl SequenceStore {
    /// Create a store holding the seed terms
    ///
    /// `size_limit` bounds how many terms may ever be retained; anything at or
    /// below the seed length disables growth.
    pub fn new(size_limit: usize) -> Self {
        Self {
            terms: Mutex::new(SEED.map(BigUint::from).to_vec()),
            size_limit,
        }
    }

    pub fn size_limit(&self) -> usize {
        self.size_limit
    }

    /// Maximum number of terms the store will hold
    pub fn capacity(&self) -> usize {
        self.size_limit.max(WINDOW)
    }

    pub fn len(&self) -> usize {
        self.terms.lock().len()
    }

    /// Always false; the seed terms are never removed
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Decimal value at 1-based index `n`, if cached
    pub fn try_read(&self, n: usize) -> Option<TriboValue> {
        // Clone under the lock, format outside it.
        let term = {
            let terms = self.terms.lock();
            terms.get(n.checked_sub(1)?)?.clone()
        };
        Some(TriboValue::from(&term))
    }

    /// Copy of the current length and last three terms
    pub fn snapshot_tail(&self) -> Tail {
        let terms = self.terms.lock();
        let len = terms.len();
        let window = [
            terms[len - 3].clone(),
            terms[len - 2].clone(),
            terms[len - 1].clone(),
        ];
        Tail::from_window(len, window)
    }

    /// Fold in terms computed from a snapshot of length `base_len`
    ///
    /// `candidate[k]` is the term at index `base_len + k + 1`. Only the part
    /// beyond the current length is appended, truncated to the capacity, so
    /// overlapping or stale candidates never duplicate terms.
    pub fn extend(&self, base_len: usize, candidate: Vec<BigUint>) -> MergeOutcome {
        let capacity = self.capacity();
        let mut terms = self.terms.lock();
        let store_len = terms.len();

        if base_len > store_len {
            return MergeOutcome::Gap {
                store_len,
                base_len,
            };
        }
        if store_len >= capacity {
            return MergeOutcome::AtCapacity;
        }

        let candidate_end = base_len + candidate.len();
        if candidate_end <= store_len {
            return MergeOutcome::AlreadyCovered;
        }

        let take = candidate_end.min(capacity) - store_len;
        terms.extend(candidate.into_iter().skip(store_len - base_len).take(take));
        MergeOutcome::Appended { count: take }
    }
}
