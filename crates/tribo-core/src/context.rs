//! Cancellable request context
//!
//! A [`RequestContext`] pairs a [`CancellationToken`] with an optional deadline.
//! The engine polls it once per extension step; it never interrupts a step
//! that is already running.

use crate::error::{TriboError, TriboResult};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Cancellation signal and deadline for a single lookup
#[derive(Debug, Clone)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Deadline>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    budget: Duration,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// A context whose token is a child of `parent`
    ///
    /// Cancelling the parent (e.g. on server shutdown) cancels this context;
    /// cancelling this context leaves the parent untouched.
    pub fn child_of(parent: &CancellationToken) -> Self {
        Self {
            token: parent.child_token(),
            deadline: None,
        }
    }

    /// A context derived from this one
    ///
    /// Inherits the deadline; its token is a child of this context's token.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Shorthand for a background context with a timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }

    /// Set a deadline `timeout` from now
    pub fn timeout(self, timeout: Duration) -> Self {
        let now = Instant::now();
        let at = now.checked_add(timeout).unwrap_or(now);
        self.deadline_inner(at, timeout)
    }

    /// Set an absolute deadline
    pub fn with_deadline(self, at: Instant) -> Self {
        let budget = at.saturating_duration_since(Instant::now());
        self.deadline_inner(at, budget)
    }

    fn deadline_inner(mut self, at: Instant, budget: Duration) -> Self {
        // A tighter existing deadline wins.
        match self.deadline {
            Some(existing) if existing.at <= at => {}
            _ => self.deadline = Some(Deadline { at, budget }),
        }
        self
    }

    /// The underlying cancellation token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The absolute deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline.map(|d| d.at)
    }

    /// Cancel this context (and any contexts derived from it)
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check whether the context is still live
    ///
    /// Explicit cancellation is reported before an expired deadline.
    pub fn check(&self) -> TriboResult<()> {
        if self.token.is_cancelled() {
            return Err(TriboError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline.at {
                return Err(TriboError::deadline_exceeded(
                    deadline.budget.as_millis() as u64,
                ));
            }
        }
        Ok(())
    }

    /// Whether [`check`](Self::check) would currently fail
    pub fn is_done(&self) -> bool {
        self.check().is_err()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
