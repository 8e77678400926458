#![forbid(unsafe_code)]

//! Process-wide online/offline signal.
//!
//! A [`ConnectivityMonitor`] attaches to a [`ConnectivitySource`] (whatever
//! the host environment offers), seeds from its current reading, and then
//! mirrors its change events one-for-one. Readers take cheap boolean
//! snapshots or await transitions through a [`ConnectivitySignal`].
//!
//! # Invariants
//!
//! - The signal reflects the most recent source event; intermediate states
//!   are not buffered.
//! - Exactly one state update per source event; no debouncing.
//! - The source subscription is released when the monitor drops, on all
//!   paths.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

/// Callback a [`ConnectivitySource`] invokes with each reachability change.
pub type LinkSink = Box<dyn Fn(bool) + Send + Sync>;

/// Environment-level reachability feed.
///
/// Implementations wrap the host runtime's notion of "online": browser
/// events, a platform notifier, or [`crate::SimulatedLink`] in tests and
/// demos.
pub trait ConnectivitySource {
    /// Instantaneous reading, when the environment can report one.
    fn current(&self) -> Option<bool>;

    /// Register `sink` for changes until the returned guard drops.
    fn subscribe(&self, sink: LinkSink) -> SourceGuard;
}

/// Releases a connectivity subscription when dropped.
pub struct SourceGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SourceGuard {
    /// Guard that runs `release` exactly once on drop.
    #[must_use]
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard for sources with nothing to tear down.
    #[must_use]
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for SourceGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for SourceGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// One process-wide reachability signal.
///
/// Create one per running client and keep it alive for the application's
/// lifetime; everything else reads through [`ConnectivitySignal`] handles.
pub struct ConnectivityMonitor {
    state: Arc<watch::Sender<bool>>,
    _subscription: SourceGuard,
}

impl ConnectivityMonitor {
    /// Attach to a source and start tracking it.
    ///
    /// The initial reading comes from [`ConnectivitySource::current`];
    /// environments that cannot report one start as online.
    #[must_use]
    pub fn attach(source: &dyn ConnectivitySource) -> Self {
        let initial = source.current().unwrap_or(true);
        let state = Arc::new(watch::channel(initial).0);
        let sink_state = Arc::clone(&state);
        let subscription = source.subscribe(Box::new(move |online| {
            tracing::debug!(message = "connectivity.change", online);
            sink_state.send_replace(online);
        }));
        tracing::debug!(message = "connectivity.attach", initial);
        Self {
            state,
            _subscription: subscription,
        }
    }

    /// Most recent reachability reading.
    #[must_use]
    pub fn is_online(&self) -> bool {
        *self.state.borrow()
    }

    /// Cloneable handle for reading or awaiting the signal.
    #[must_use]
    pub fn signal(&self) -> ConnectivitySignal {
        ConnectivitySignal {
            rx: self.state.subscribe(),
        }
    }
}

impl fmt::Debug for ConnectivityMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectivityMonitor")
            .field("is_online", &self.is_online())
            .finish()
    }
}

/// Read handle over the connectivity signal.
#[derive(Debug, Clone)]
pub struct ConnectivitySignal {
    rx: watch::Receiver<bool>,
}

impl ConnectivitySignal {
    /// Current reading without waiting.
    #[must_use]
    pub fn is_online(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the next signal update and return the new reading, or
    /// `None` once the monitor is gone.
    pub async fn changed(&mut self) -> Option<bool> {
        match self.rx.changed().await {
            Ok(()) => Some(*self.rx.borrow_and_update()),
            Err(_) => None,
        }
    }
}
