//! Latest-request-wins guard for filter-context changes
//!
//! Each change of period, drill state or dimension filter issues a new
//! ticket. A fetch result is applied only if its ticket is still the latest,
//! so a slow response for an older context never overwrites fresher state.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Hands out tickets and tells whether a ticket is still current.
///
/// Shareable across threads (`&self` methods on an atomic counter).
#[derive(Debug, Default)]
pub struct RequestGuard {
    latest: AtomicU64,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new context, superseding all earlier ones
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Pass `value` through if `ticket` is still current, drop it otherwise
    pub fn accept<T>(&self, ticket: RequestTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                "Discarding stale result for request #{} (latest #{})",
                ticket.0,
                self.latest.load(Ordering::Acquire)
            );
            None
        }
    }
}
