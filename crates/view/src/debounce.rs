//! Time and ordering guards for user input and in-flight requests.
//!
//! Nothing here owns a timer. Callers pass the current instant in, which keeps
//! the types usable from both async tasks and synchronous tests.

use std::time::{Duration, Instant};

/// Holds the most recent value until `delay` has passed without a newer one.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the wait.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Releases the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if due {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Lets only the newest of several overlapping requests land.
///
/// Every request takes a ticket; a response is applied only if its ticket
/// is still the latest one issued.
#[derive(Debug, Clone, Default)]
pub struct LatestGuard {
    current: u64,
}

impl LatestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.current = self.current.wrapping_add(1);
        Ticket(self.current)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }

    /// Invalidates every ticket issued so far.
    pub fn invalidate(&mut self) {
        self.current = self.current.wrapping_add(1);
    }
}

/// Debounced, switch-to-latest request trigger.
///
/// Used for quotes that follow a text input: keystrokes are collapsed by the
/// debounce, and a slow answer to an older request never overwrites a newer
/// one.
#[derive(Debug, Clone)]
pub struct RequestGate<P> {
    debounce: Debounce<P>,
    guard: LatestGuard,
}

impl<P> RequestGate<P> {
    pub fn new(delay: Duration) -> Self {
        Self {
            debounce: Debounce::new(delay),
            guard: LatestGuard::new(),
        }
    }

    /// Records new request parameters. Any response still outstanding is
    /// stale from this point on.
    pub fn request(&mut self, params: P, now: Instant) {
        self.guard.invalidate();
        self.debounce.push(params, now);
    }

    /// Parameters to send now, with the ticket their response must present.
    pub fn poll(&mut self, now: Instant) -> Option<(Ticket, P)> {
        let params = self.debounce.poll(now)?;
        Some((self.guard.issue(), params))
    }

    pub fn accept(&self, ticket: Ticket) -> bool {
        self.guard.is_latest(ticket)
    }

    pub fn cancel(&mut self) {
        self.debounce.cancel();
        self.guard.invalidate();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }
}
