//! Request tickets guarding list views against stale responses.

use std::time::{Duration, Instant};

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket<S> {
    id: u64,
    scope: S,
    issued_at: Instant,
}

impl<S> RequestTicket<S> {
    /// Monotonic request identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Server-side scope the request was issued for.
    #[must_use]
    pub const fn scope(&self) -> &S {
        &self.scope
    }

    /// Time since the ticket was issued.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.issued_at.elapsed()
    }
}

/// Issues tickets and decides which completion may be applied.
///
/// A completion is current only when its ticket is the latest issued and
/// its scope equals the scope the view needs now.
#[derive(Debug, Clone)]
pub struct RequestTracker<S> {
    next_id: u64,
    latest: Option<u64>,
    _scope: std::marker::PhantomData<S>,
}

impl<S> Default for RequestTracker<S> {
    fn default() -> Self {
        Self {
            next_id: 1,
            latest: None,
            _scope: std::marker::PhantomData,
        }
    }
}

impl<S: PartialEq> RequestTracker<S> {
    /// Creates a tracker with no requests issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for `scope`, superseding every earlier ticket.
    pub fn issue(&mut self, scope: S) -> RequestTicket<S> {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        self.latest = Some(id);
        RequestTicket {
            id,
            scope,
            issued_at: Instant::now(),
        }
    }

    /// Returns true when `ticket` may be applied for `current_scope`.
    #[must_use]
    pub fn is_current(&self, ticket: &RequestTicket<S>, current_scope: &S) -> bool {
        self.latest == Some(ticket.id) && ticket.scope == *current_scope
    }

    /// Returns the identifier of the latest ticket, if any.
    #[must_use]
    pub const fn latest(&self) -> Option<u64> {
        self.latest
    }
}
