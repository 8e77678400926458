#![forbid(unsafe_code)]

//! Optimistic mutation coordinator.
//!
//! [`UpdateCoordinator::execute`] drives a mutation through three phases:
//! a connectivity gate check, an optimistic local apply, and a remote call
//! that either commits the optimistic result or rolls it back. Callers
//! describe the mutation as an [`UpdateCmd`] and observe it through
//! [`UpdateCallbacks`] plus the [`UpdateState`] snapshot.
//!
//! # Invariants
//!
//! - `is_optimistic` and `is_error` are never both `true` in a published
//!   snapshot.
//! - `error` is `Some` exactly when `is_error` is `true`.
//! - Within one invocation the order is fixed: gate check, apply, remote,
//!   then commit or rollback, then `on_settled`. A rejected invocation runs
//!   no apply, no remote, and no `on_settled`.
//! - On failure the rollback action runs before `on_error` observes the
//!   error.
//!
//! # Failure modes
//!
//! Overlapping invocations on one coordinator are not serialized; the
//! snapshot reflects whichever invocation settles last. Callers that need
//! one-at-a-time behavior disable their trigger while `is_optimistic` is
//! set, as [`ffeed_widgets`]' post card does.
//!
//! [`ffeed_widgets`]: https://docs.rs/ffeed-widgets

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use arc_swap::ArcSwap;
use futures::future::BoxFuture;

use ffeed_store::StoreError;

use crate::connectivity::ConnectivitySignal;

/// Failure type accepted from remote futures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The remote half of an [`UpdateCmd`], boxed so commands stay nameable.
pub type RemoteFuture<T> = BoxFuture<'static, std::result::Result<T, BoxError>>;

type Action = Box<dyn FnOnce() + Send>;

/// Message substituted for remote failures that carry no text of their own.
pub const UNKNOWN_FAILURE: &str = "Unknown error";

/// Why an invocation did not commit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// The gate check failed; nothing was applied.
    #[error("no connection")]
    Offline,
    /// The remote call failed after the optimistic apply; it was rolled back.
    #[error(transparent)]
    Remote(#[from] StoreError),
}

/// Snapshot of a coordinator, published after every phase transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateState {
    /// An optimistic apply is visible and its remote call has not settled.
    pub is_optimistic: bool,
    /// The most recent invocation rolled back.
    pub is_error: bool,
    /// The failure behind `is_error`, if any.
    pub error: Option<UpdateError>,
    /// The most recent invocation was rejected by the gate check.
    pub is_offline: bool,
}

/// One mutation: an optimistic apply, a remote call, and the undo for the
/// apply should the remote call fail.
pub struct UpdateCmd<T> {
    apply: Action,
    remote: RemoteFuture<T>,
    rollback: Action,
}

impl<T> UpdateCmd<T> {
    /// Packages the three halves of a mutation.
    ///
    /// `rollback` must restore exactly what `apply` changed; the coordinator
    /// runs it verbatim when the remote call fails.
    #[must_use]
    pub fn new(
        apply: impl FnOnce() + Send + 'static,
        remote: impl Future<Output = std::result::Result<T, BoxError>> + Send + 'static,
        rollback: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            apply: Box::new(apply),
            remote: Box::pin(remote),
            rollback: Box::new(rollback),
        }
    }
}

impl<T> fmt::Debug for UpdateCmd<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCmd").finish_non_exhaustive()
    }
}

/// Observer hooks for one invocation. Every hook is optional.
pub struct UpdateCallbacks<T> {
    on_success: Option<Box<dyn FnOnce(&T) + Send>>,
    on_error: Option<Box<dyn FnOnce(&UpdateError) + Send>>,
    on_offline: Option<Box<dyn FnOnce() + Send>>,
    on_settled: Option<Box<dyn FnOnce() + Send>>,
}

impl<T> UpdateCallbacks<T> {
    /// A callback set with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_success: None,
            on_error: None,
            on_offline: None,
            on_settled: None,
        }
    }

    /// Runs after a commit, with the remote call's value.
    #[must_use]
    pub fn with_success(mut self, hook: impl FnOnce(&T) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    /// Runs after a rollback, with the normalized error.
    #[must_use]
    pub fn with_error(mut self, hook: impl FnOnce(&UpdateError) + Send + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Runs when the gate check rejects the invocation.
    #[must_use]
    pub fn with_offline(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_offline = Some(Box::new(hook));
        self
    }

    /// Runs after a commit or a rollback, never after a rejection.
    #[must_use]
    pub fn with_settled(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_settled = Some(Box::new(hook));
        self
    }
}

impl<T> Default for UpdateCallbacks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for UpdateCallbacks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCallbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_offline", &self.on_offline.is_some())
            .field("on_settled", &self.on_settled.is_some())
            .finish()
    }
}

/// Runs gated optimistic mutations and publishes [`UpdateState`] snapshots.
pub struct UpdateCoordinator {
    gate: ConnectivitySignal,
    state: ArcSwap<UpdateState>,
    refresh: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl UpdateCoordinator {
    /// Builds a coordinator gated on `signal`.
    #[must_use]
    pub fn new(signal: ConnectivitySignal) -> Self {
        Self {
            gate: signal,
            state: ArcSwap::from_pointee(UpdateState::default()),
            refresh: None,
        }
    }

    /// Installs a hook that runs after every commit, before `on_settled`.
    ///
    /// Feed views register their reload trigger here so committed mutations
    /// are eventually reconciled against the store.
    #[must_use]
    pub fn with_refresh(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.refresh = Some(Arc::new(hook));
        self
    }

    /// The current snapshot.
    #[must_use]
    pub fn state(&self) -> UpdateState {
        self.state.load_full().as_ref().clone()
    }

    /// The gate's current reading.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.gate.is_online()
    }

    /// Drives `cmd` through the gate check, the optimistic apply, and the
    /// remote call.
    ///
    /// Returns the remote value on commit. Returns [`UpdateError::Offline`]
    /// when the gate rejects the invocation and [`UpdateError::Remote`] when
    /// the remote call fails and the apply is rolled back.
    pub async fn execute<T>(
        &self,
        cmd: UpdateCmd<T>,
        callbacks: UpdateCallbacks<T>,
    ) -> std::result::Result<T, UpdateError> {
        let UpdateCmd {
            apply,
            remote,
            rollback,
        } = cmd;
        let UpdateCallbacks {
            on_success,
            on_error,
            on_offline,
            on_settled,
        } = callbacks;

        if !self.gate.is_online() {
            let mut next = self.state();
            next.is_offline = true;
            self.state.store(Arc::new(next));
            tracing::debug!(message = "update.reject_offline");
            if let Some(hook) = on_offline {
                hook();
            }
            return Err(UpdateError::Offline);
        }

        apply();
        self.state.store(Arc::new(UpdateState {
            is_optimistic: true,
            ..UpdateState::default()
        }));

        let settled = match remote.await {
            Ok(value) => {
                let mut next = self.state();
                next.is_optimistic = false;
                self.state.store(Arc::new(next));
                tracing::debug!(message = "update.commit");
                if let Some(hook) = on_success {
                    hook(&value);
                }
                if let Some(refresh) = &self.refresh {
                    refresh();
                }
                Ok(value)
            }
            Err(failure) => {
                rollback();
                let error = UpdateError::Remote(normalize(failure));
                let mut next = self.state();
                next.is_optimistic = false;
                next.is_error = true;
                next.error = Some(error.clone());
                self.state.store(Arc::new(next));
                if let Some(hook) = on_error {
                    hook(&error);
                }
                tracing::error!(message = "update.rollback", error = %error);
                Err(error)
            }
        };

        if let Some(hook) = on_settled {
            hook();
        }
        settled
    }
}

impl fmt::Debug for UpdateCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateCoordinator")
            .field("state", self.state.load().as_ref())
            .field("refresh", &self.refresh.is_some())
            .finish()
    }
}

/// Collapses an arbitrary remote failure into a [`StoreError`].
///
/// Store errors pass through unchanged. Anything else keeps its display
/// text, or [`UNKNOWN_FAILURE`] when that text is empty.
fn normalize(failure: BoxError) -> StoreError {
    match failure.downcast::<StoreError>() {
        Ok(store) => *store,
        Err(other) => {
            let message = other.to_string();
            if message.trim().is_empty() {
                StoreError::other(UNKNOWN_FAILURE)
            } else {
                StoreError::other(message)
            }
        }
    }
}
