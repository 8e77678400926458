#![forbid(unsafe_code)]

//! Simulated connectivity for tests and the demo binary.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::connectivity::{ConnectivitySource, LinkSink, SourceGuard};

/// In-process connectivity source driven by hand.
///
/// Starts online unless built with [`SimulatedLink::starting_offline`].
/// `set_online` flips the link and fans out to every attached sink
/// synchronously on the calling thread; setting the current state again is
/// a no-op.
#[derive(Clone)]
pub struct SimulatedLink {
    inner: Arc<Mutex<LinkInner>>,
}

struct LinkInner {
    online: bool,
    sinks: Vec<(u64, LinkSink)>,
    next_sink_id: u64,
}

impl SimulatedLink {
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(true)
    }

    #[must_use]
    pub fn starting_offline() -> Self {
        Self::with_state(false)
    }

    fn with_state(online: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LinkInner {
                online,
                sinks: Vec::new(),
                next_sink_id: 0,
            })),
        }
    }

    /// Flip the link. Notifies sinks only on an actual transition.
    pub fn set_online(&self, online: bool) {
        let mut inner = self.lock();
        if inner.online == online {
            return;
        }
        inner.online = online;
        tracing::debug!(message = "sim.link", online, sinks = inner.sinks.len());
        for (_, sink) in &inner.sinks {
            sink(online);
        }
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.lock().online
    }

    /// Number of currently attached sinks.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().sinks.len()
    }

    fn lock(&self) -> MutexGuard<'_, LinkInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatedLink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivitySource for SimulatedLink {
    fn current(&self) -> Option<bool> {
        Some(self.is_online())
    }

    fn subscribe(&self, sink: LinkSink) -> SourceGuard {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_sink_id;
            inner.next_sink_id += 1;
            inner.sinks.push((id, sink));
            id
        };
        let weak: Weak<Mutex<LinkInner>> = Arc::downgrade(&self.inner);
        SourceGuard::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
                inner.sinks.retain(|(sink_id, _)| *sink_id != id);
            }
        })
    }
}

impl fmt::Debug for SimulatedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("SimulatedLink")
            .field("online", &inner.online)
            .field("sinks", &inner.sinks.len())
            .finish()
    }
}
