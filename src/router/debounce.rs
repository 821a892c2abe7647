use std::time::{Duration, Instant};

/// Cancel-and-reschedule timer.
///
/// Each `schedule` replaces the pending value and pushes the deadline out
/// by `window`. Values stamped earlier than the pending one are stale and
/// dropped, so the newest event always wins regardless of delivery order.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    stamped: Instant,
    due: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns false when `stamped` is older than the pending value
    pub fn schedule(&mut self, value: T, stamped: Instant) -> bool {
        if let Some(pending) = &self.pending {
            if stamped < pending.stamped {
                return false;
            }
        }

        self.pending = Some(Pending {
            value,
            stamped,
            due: stamped + self.window,
        });
        true
    }

    /// Take the pending value once its deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<(T, Instant)> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.take(),
            _ => None,
        }
    }

    /// Take the pending value regardless of its deadline
    pub fn take(&mut self) -> Option<(T, Instant)> {
        self.pending.take().map(|p| (p.value, p.stamped))
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
