use super::{Debouncer, MapEvent, Rerun};
use std::time::{Duration, Instant};
use tracing::trace;

/// What the engine should do with an event right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Run a pass immediately
    Now(Rerun),
    /// A pass is scheduled; poll the router to run it
    Deferred,
    /// Older than a pass already applied
    Ignored,
}

/// Decides which stages each event reruns and when.
///
/// Viewport events are coalesced within the debounce window. Any immediate
/// event absorbs a pending deferred pass, so passes are applied in event
/// timestamp order and a superseded pass never lands after a newer one.
#[derive(Debug)]
pub struct EventRouter {
    debouncer: Debouncer<Rerun>,
    last_applied: Option<Instant>,
}

impl EventRouter {
    pub fn new(window: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(window),
            last_applied: None,
        }
    }

    pub fn route(&mut self, event: &MapEvent, at: Instant) -> Dispatch {
        // Replaced points must always be laid out; a late stamp is moved up
        let at = match (event, self.last_applied) {
            (MapEvent::PointsChanged, Some(applied)) => at.max(applied),
            _ => at,
        };

        if self.last_applied.is_some_and(|applied| at < applied) {
            trace!(?event, "dropping stale event");
            return Dispatch::Ignored;
        }

        let rerun = Rerun::for_event(event);

        if event.is_debounced() {
            let merged = self
                .debouncer
                .pending()
                .map_or(rerun, |pending| pending.union(rerun));
            return if self.debouncer.schedule(merged, at) {
                Dispatch::Deferred
            } else {
                Dispatch::Ignored
            };
        }

        let rerun = match self.debouncer.take() {
            Some((pending, _)) => pending.union(rerun),
            None => rerun,
        };
        self.last_applied = Some(at);
        Dispatch::Now(rerun)
    }

    /// Fire the deferred pass if its window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<Rerun> {
        let (rerun, stamped) = self.debouncer.poll(now)?;
        self.last_applied = Some(stamped);
        Some(rerun)
    }

    /// Fire the deferred pass now
    pub fn flush(&mut self) -> Option<Rerun> {
        let (rerun, stamped) = self.debouncer.take()?;
        self.last_applied = Some(stamped);
        Some(rerun)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
