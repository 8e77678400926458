#![forbid(unsafe_code)]

//! FrankenFeed client runtime.
//!
//! Two cooperating units:
//!
//! - [`ConnectivityMonitor`]: one process-wide online/offline signal, seeded
//!   from the environment and tracked event-for-event, with scoped
//!   subscription teardown. [`RestoreTracker`] sits on top of it and reports
//!   the one-shot "connection restored" moment.
//! - [`UpdateCoordinator`]: runs a user-initiated mutation in three phases.
//!   It gates on the connectivity signal, applies the optimistic action,
//!   awaits the remote call, then commits or rolls back, publishing
//!   [`UpdateState`] flags for UI binding.
//!
//! Execution is single-threaded and cooperative: the only suspension point
//! is the remote call. Nothing here spawns threads or takes locks around the
//! per-update state.

pub mod connectivity;
pub mod optimistic;
pub mod restore;
pub mod sim;

pub use connectivity::{ConnectivityMonitor, ConnectivitySignal, ConnectivitySource, LinkSink, SourceGuard};
pub use optimistic::{
    BoxError, RemoteFuture, UNKNOWN_FAILURE, UpdateCallbacks, UpdateCmd, UpdateCoordinator,
    UpdateError, UpdateState,
};
pub use restore::{NO_CONNECTION_NOTICE, RESTORED_MESSAGE, RestoreTracker, announce_restores, connection_notice};
pub use sim::SimulatedLink;
