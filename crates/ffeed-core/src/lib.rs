#![forbid(unsafe_code)]

//! FrankenFeed domain core.
//!
//! Records exposed by the external data store, the listing query model
//! (author filter plus 1-based paging), windowed page math, and the toast
//! notification model shared by widgets and observers.
//!
//! This crate is deliberately free of I/O: everything here is plain data
//! plus the arithmetic the listing UI needs.

pub mod entity;
pub mod page;
pub mod query;
pub mod toast;

pub use entity::{DeleteReceipt, Post, PostId, PostWithAuthor, User, UserId};
pub use page::{DEFAULT_PER_PAGE, Page, PageItem, page_window};
pub use query::FeedQuery;
pub use toast::{Toast, ToastKind, ToastQueue};
