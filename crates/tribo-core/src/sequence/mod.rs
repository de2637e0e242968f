//! Tribonacci recurrence
//!
//! `T(1) = 0, T(2) = 0, T(3) = 1, T(i) = T(i-1) + T(i-2) + T(i-3)`.
//!
//! The extender works on a private [`Tail`] and never touches the shared
//! cache; results are folded back by the engine afterwards.

use num_bigint::BigUint;

/// Seed values for indices 1, 2 and 3
pub const SEED: [u32; 3] = [0, 0, 1];

/// Number of terms needed to continue the recurrence
pub const WINDOW: usize = SEED.len();

/// The three most recent terms of a sequence and its length
///
/// Owns deep copies of the terms, so it can be moved across threads and
/// mutated without affecting the sequence it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tail {
    len: usize,
    window: [BigUint; WINDOW],
}

impl Tail {
    /// Tail of the unextended seed sequence
    pub fn seed() -> Self {
        Self {
            len: WINDOW,
            window: SEED.map(BigUint::from),
        }
    }

    /// Build a tail from the last three terms of a sequence of length `len`
    ///
    /// Returns `None` when `len` is too short to hold three terms.
    pub fn new(len: usize, window: [BigUint; WINDOW]) -> Option<Self> {
        (len >= WINDOW).then_some(Self { len, window })
    }

    /// Caller guarantees `len >= WINDOW`
    pub(crate) fn from_window(len: usize, window: [BigUint; WINDOW]) -> Self {
        debug_assert!(len >= WINDOW);
        Self { len, window }
    }

    /// Length of the sequence the tail was taken from
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a tail never describes a sequence shorter than the window
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The newest term
    pub fn last(&self) -> &BigUint {
        &self.window[WINDOW - 1]
    }

    pub fn window(&self) -> &[BigUint; WINDOW] {
        &self.window
    }
}

/// Iteratively extends a [`Tail`] by the recurrence
///
/// Each step's term is kept in a private extension list only while the total
/// length stays below `retain_limit`; terms past the limit are computed but
/// not retained.
#[derive(Debug)]
pub struct SequenceExtender {
    tail: Tail,
    base_len: usize,
    retain_limit: usize,
    extension: Vec<BigUint>,
}

impl SequenceExtender {
    pub fn new(tail: Tail, retain_limit: usize) -> Self {
        let base_len = tail.len;
        Self {
            tail,
            base_len,
            retain_limit,
            extension: Vec::new(),
        }
    }

    /// Compute the next term and return it
    pub fn step(&mut self) -> &BigUint {
        let [a, b, c] = &mut self.tail.window;
        // Reuse the oldest term's allocation for the new one.
        *a += &*b;
        *a += &*c;
        self.tail.window.rotate_left(1);

        if self.tail.len < self.retain_limit {
            self.extension.push(self.tail.last().clone());
        }
        self.tail.len += 1;
        self.tail.last()
    }

    /// Step until the sequence has `target` terms
    ///
    /// Does nothing if it is already that long.
    pub fn advance_to(&mut self, target: usize) -> &BigUint {
        while self.tail.len < target {
            self.step();
        }
        self.tail.last()
    }

    /// Number of terms in the extended sequence
    pub fn len(&self) -> usize {
        self.tail.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current(&self) -> &BigUint {
        self.tail.last()
    }

    /// Length of the sequence the extension starts after, and the retained terms
    pub fn into_extension(self) -> (usize, Vec<BigUint>) {
        (self.base_len, self.extension)
    }
}

/// Compute `T(n)` from scratch without any caching
///
/// `n` is 1-based; `n == 0` yields `None`.
pub fn nth(n: usize) -> Option<BigUint> {
    if n == 0 {
        return None;
    }
    if n <= WINDOW {
        return Some(BigUint::from(SEED[n - 1]));
    }
    let mut extender = SequenceExtender::new(Tail::seed(), 0);
    Some(extender.advance_to(n).clone())
}
