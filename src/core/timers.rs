//! One-shot timer registry for delayed, cancelable callbacks.
//!
//! **Why**: The gesture layer needs three delayed actions (single-tap commit,
//! overlay auto-hide, coalesced seek commit) that must be individually
//! cancelable and collectively torn down with the widget.
//!
//! **Used by**: PlayerCore (tick loop), gesture handlers, seek bar protocol.
//!
//! # Timing Model
//!
//! Deadline-based: every call takes the current `Instant` from the caller,
//! so tests drive time explicitly and the UI passes `Instant::now()`.
//! Timers fire when the owner polls `take_due()` from its update loop.
//! Rescheduling a kind that is already pending replaces it (last wins).

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Logical timer slots. One pending instance per kind, ever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Delayed single-tap commit, awaiting a possible second tap.
    Click,
    /// Auto-hide of a discrete gesture overlay.
    OverlayHide,
    /// Next-frame commit of a coalesced seek-bar position.
    SeekFrame,
}

/// Callback fired when a timer comes due. Receives the owning state so it
/// can mutate transport/overlay without shared references.
pub type TimerCallback<T> = Box<dyn FnOnce(&mut T)>;

struct PendingTimer<T> {
    deadline: Instant,
    callback: TimerCallback<T>,
}

/// Registry of pending one-shot timers.
///
/// Invariants:
/// - at most one pending timer per [`TimerKind`] (schedule supersedes);
/// - `cancel_all()` leaves the registry empty and is safe to call repeatedly;
/// - a canceled timer never fires (entries are removed, not flagged).
pub struct TimerRegistry<T> {
    pending: HashMap<TimerKind, PendingTimer<T>>,
}

impl<T> Default for TimerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerRegistry<T> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
        }
    }

    /// Schedule `callback` to fire `delay` after `now`.
    ///
    /// Any prior timer under the same kind is dropped first, so a stale
    /// instance can never fire after a reschedule.
    pub fn schedule<F>(&mut self, kind: TimerKind, delay: Duration, now: Instant, callback: F)
    where
        F: FnOnce(&mut T) + 'static,
    {
        self.pending.insert(
            kind,
            PendingTimer {
                deadline: now + delay,
                callback: Box::new(callback),
            },
        );
    }

    /// Cancel the pending timer under `kind`, if any.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.remove(&kind);
    }

    /// Cancel everything. Idempotent; required on widget teardown so no
    /// callback can run after the surface is gone.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether a timer is pending under `kind`.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }

    /// Earliest pending deadline, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|t| t.deadline).min()
    }

    /// Deadline of the pending timer under `kind`, if any.
    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.pending.get(&kind).map(|t| t.deadline)
    }

    /// Remove and return every callback whose deadline has passed, ordered
    /// by deadline. The owner invokes them after this call returns, so a
    /// callback may freely reschedule into the registry.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerCallback<T>> {
        let mut due: Vec<(Instant, TimerKind)> = self
            .pending
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(k, t)| (t.deadline, *k))
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);

        due.into_iter()
            .filter_map(|(_, kind)| self.pending.remove(&kind).map(|t| t.callback))
            .collect()
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_deadline() {
        let mut reg: TimerRegistry<i32> = TimerRegistry::new();
        let t0 = Instant::now();
        reg.schedule(TimerKind::Click, ms(300), t0, |v| *v += 1);

        let mut state = 0;
        assert!(reg.take_due(t0 + ms(299)).is_empty());
        for cb in reg.take_due(t0 + ms(300)) {
            cb(&mut state);
        }
        assert_eq!(state, 1);
        assert!(!reg.is_pending(TimerKind::Click));
    }

    #[test]
    fn test_reschedule_supersedes() {
        let mut reg: TimerRegistry<Vec<&'static str>> = TimerRegistry::new();
        let t0 = Instant::now();
        reg.schedule(TimerKind::Click, ms(100), t0, |v| v.push("first"));
        reg.schedule(TimerKind::Click, ms(200), t0, |v| v.push("second"));
        assert_eq!(reg.len(), 1);

        let mut fired = Vec::new();
        // Original deadline passed, but the first timer was superseded.
        assert!(reg.take_due(t0 + ms(150)).is_empty());
        for cb in reg.take_due(t0 + ms(200)) {
            cb(&mut fired);
        }
        assert_eq!(fired, vec!["second"]);
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut reg: TimerRegistry<i32> = TimerRegistry::new();
        let t0 = Instant::now();
        reg.schedule(TimerKind::OverlayHide, ms(50), t0, |v| *v += 1);
        reg.cancel(TimerKind::OverlayHide);

        let mut state = 0;
        for cb in reg.take_due(t0 + ms(100)) {
            cb(&mut state);
        }
        assert_eq!(state, 0);
    }

    #[test]
    fn test_cancel_all_idempotent() {
        let mut reg: TimerRegistry<i32> = TimerRegistry::new();
        let t0 = Instant::now();
        reg.schedule(TimerKind::Click, ms(10), t0, |_| {});
        reg.schedule(TimerKind::OverlayHide, ms(20), t0, |_| {});
        reg.schedule(TimerKind::SeekFrame, ms(0), t0, |_| {});

        reg.cancel_all();
        assert!(reg.is_empty());
        reg.cancel_all(); // safe twice
        assert!(reg.take_due(t0 + ms(1000)).is_empty());
    }

    #[test]
    fn test_due_order_by_deadline() {
        let mut reg: TimerRegistry<Vec<TimerKind>> = TimerRegistry::new();
        let t0 = Instant::now();
        reg.schedule(TimerKind::OverlayHide, ms(30), t0, |v| {
            v.push(TimerKind::OverlayHide)
        });
        reg.schedule(TimerKind::Click, ms(10), t0, |v| v.push(TimerKind::Click));
        reg.schedule(TimerKind::SeekFrame, ms(20), t0, |v| {
            v.push(TimerKind::SeekFrame)
        });

        let mut order = Vec::new();
        for cb in reg.take_due(t0 + ms(100)) {
            cb(&mut order);
        }
        assert_eq!(
            order,
            vec![TimerKind::Click, TimerKind::SeekFrame, TimerKind::OverlayHide]
        );
    }

    #[test]
    fn test_next_deadline() {
        let mut reg: TimerRegistry<()> = TimerRegistry::new();
        let t0 = Instant::now();
        assert!(reg.next_deadline().is_none());
        reg.schedule(TimerKind::Click, ms(300), t0, |_| {});
        reg.schedule(TimerKind::SeekFrame, ms(5), t0, |_| {});
        assert_eq!(reg.next_deadline(), Some(t0 + ms(5)));
    }
}
