#![forbid(unsafe_code)]

//! Widgets for the FrankenFeed post feed.
//!
//! Pure state machines plus the glue that binds them to the runtime:
//!
//! - [`FeedController`]: loads authors and posts for the current query.
//! - [`PostCard`]: one post with its gated optimistic delete flow.
//! - [`AuthorFilter`]: the author dropdown, keyboard semantics included.
//! - [`PaginationControl`]: compressed page window and result summary.
//! - [`ConfirmationModal`]: confirm-or-dismiss dialog state.
//!
//! Widgets hold no rendering. Hosts read their accessors each frame and
//! feed [`Key`] presses and clicks back in.

pub mod card;
pub mod controller;
pub mod filter;
pub mod input;
pub mod modal;
pub mod pagination;

pub use card::{DELETE_FAILURE_TOAST, DELETE_SUCCESS_TOAST, PostCard, UNKNOWN_AUTHOR};
pub use controller::{FeedController, FeedPhase, NO_POSTS, NO_POSTS_FOR_AUTHOR};
pub use filter::{ALL_AUTHORS, AuthorFilter, UNNAMED_USER};
pub use input::Key;
pub use modal::{ConfirmationModal, ModalAction, ModalPrompt};
pub use pagination::PaginationControl;
