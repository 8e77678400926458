#![forbid(unsafe_code)]

//! Restoration watcher: the one-shot "connection restored" notification.
//!
//! Deliberately separate from [`crate::ConnectivityMonitor`]: the monitor
//! only mirrors the environment, while restoration is an observer-side
//! judgement about successive readings.
//!
//! # Invariants
//!
//! - At most one notification per offline-to-online transition.
//! - No notification unless an offline reading was observed (or seeded)
//!   first.

use ffeed_core::{Toast, ToastQueue};

use crate::connectivity::ConnectivitySignal;

/// Toast text pushed when connectivity returns.
pub const RESTORED_MESSAGE: &str = "Connection restored";

/// Indicator text shown while the client is offline.
pub const NO_CONNECTION_NOTICE: &str = "No connection";

/// Status-line text for a reachability reading, when one should show.
#[must_use]
pub const fn connection_notice(is_online: bool) -> Option<&'static str> {
    if is_online {
        None
    } else {
        Some(NO_CONNECTION_NOTICE)
    }
}

/// Tracks offline observations and reports the moment connectivity returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreTracker {
    was_offline: bool,
}

impl RestoreTracker {
    /// Start tracking. `initially_offline` seeds the recorded flag so a
    /// client that comes up without connectivity still gets its notification
    /// even though no offline event ever fired.
    #[must_use]
    pub const fn new(initially_offline: bool) -> Self {
        Self {
            was_offline: initially_offline,
        }
    }

    /// Feed the next reading. True when it completes an offline-to-online
    /// transition; the recorded flag clears so the next online reading stays
    /// quiet.
    pub fn observe(&mut self, is_online: bool) -> bool {
        if !is_online {
            self.was_offline = true;
            return false;
        }
        if self.was_offline {
            self.was_offline = false;
            tracing::debug!(message = "connectivity.restored");
            return true;
        }
        false
    }
}

/// Drive a [`RestoreTracker`] from a signal, pushing one success toast per
/// restoration. Runs until the monitor behind `signal` is dropped; intended
/// to sit alongside the UI loop.
pub async fn announce_restores(mut signal: ConnectivitySignal, toasts: ToastQueue) {
    let mut tracker = RestoreTracker::new(!signal.is_online());
    while let Some(online) = signal.changed().await {
        if tracker.observe(online) {
            toasts.push(Toast::success(RESTORED_MESSAGE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::ConnectivityMonitor;
    use crate::sim::SimulatedLink;
    use ffeed_core::ToastKind;

    #[test]
    fn restoration_fires_once_per_transition() {
        let mut tracker = RestoreTracker::new(false);
        assert!(!tracker.observe(false));
        assert!(tracker.observe(true));
        // Still online: no second notification.
        assert!(!tracker.observe(true));
    }

    #[test]
    fn no_notification_without_a_prior_offline_reading() {
        let mut tracker = RestoreTracker::new(false);
        assert!(!tracker.observe(true));
        assert!(!tracker.observe(true));
    }

    #[test]
    fn seeded_offline_start_notifies_on_first_online() {
        let mut tracker = RestoreTracker::new(true);
        assert!(tracker.observe(true));
    }

    #[test]
    fn each_full_cycle_notifies_again() {
        let mut tracker = RestoreTracker::new(false);
        assert!(!tracker.observe(false));
        assert!(tracker.observe(true));
        assert!(!tracker.observe(false));
        assert!(tracker.observe(true));
    }

    #[test]
    fn notice_shows_only_while_offline() {
        assert_eq!(connection_notice(false), Some(NO_CONNECTION_NOTICE));
        assert_eq!(connection_notice(true), None);
    }

    #[tokio::test]
    async fn announcer_pushes_one_toast_per_restoration() {
        let link = SimulatedLink::new();
        let monitor = ConnectivityMonitor::attach(&link);
        let toasts = ToastQueue::new();
        let mut announcer = std::pin::pin!(announce_restores(monitor.signal(), toasts.clone()));

        // Seed the tracker and park on the signal.
        assert!(futures::poll!(announcer.as_mut()).is_pending());

        link.set_online(false);
        assert!(futures::poll!(announcer.as_mut()).is_pending());
        assert!(toasts.is_empty());

        link.set_online(true);
        assert!(futures::poll!(announcer.as_mut()).is_pending());
        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].kind, ToastKind::Success);
        assert_eq!(drained[0].message, RESTORED_MESSAGE);

        // Already online: no event, no toast.
        link.set_online(true);
        assert!(futures::poll!(announcer.as_mut()).is_pending());
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn announcer_covers_an_offline_start() {
        let link = SimulatedLink::starting_offline();
        let monitor = ConnectivityMonitor::attach(&link);
        let toasts = ToastQueue::new();
        let mut announcer = std::pin::pin!(announce_restores(monitor.signal(), toasts.clone()));
        assert!(futures::poll!(announcer.as_mut()).is_pending());

        link.set_online(true);
        assert!(futures::poll!(announcer.as_mut()).is_pending());
        assert_eq!(toasts.drain().len(), 1);
    }

    #[tokio::test]
    async fn announcer_ends_when_the_monitor_drops() {
        let link = SimulatedLink::new();
        let monitor = ConnectivityMonitor::attach(&link);
        let toasts = ToastQueue::new();
        let mut announcer = std::pin::pin!(announce_restores(monitor.signal(), toasts.clone()));
        assert!(futures::poll!(announcer.as_mut()).is_pending());

        drop(monitor);
        assert!(futures::poll!(announcer.as_mut()).is_ready());
        assert!(toasts.is_empty());
    }
}
