#![forbid(unsafe_code)]

//! Transient notifications ("toasts") and the queue widgets push them into.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Bounded queue of pending toasts, shared by cloning.
///
/// # Invariants
///
/// - Never holds more than the configured capacity; pushing to a full queue
///   drops the oldest entry first.
/// - `drain` hands toasts back in push order.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<Toast>>>,
    capacity: usize,
}

impl ToastQueue {
    pub const DEFAULT_CAPACITY: usize = 32;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Queue bounded to `capacity` entries (clamped to >= 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append a toast, evicting the oldest entry when full.
    pub fn push(&self, toast: Toast) {
        let mut pending = self.lock();
        let evicted = if pending.len() == self.capacity {
            pending.pop_front();
            true
        } else {
            false
        };
        tracing::debug!(
            message = "toast.push",
            kind = ?toast.kind,
            evicted,
        );
        pending.push_back(toast);
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.lock().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        // A panicked pusher leaves at worst a missing toast, so recover.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}
