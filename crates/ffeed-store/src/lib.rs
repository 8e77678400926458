#![forbid(unsafe_code)]

//! Data-store boundary for FrankenFeed.
//!
//! The rest of the system talks to an abstract [`PostStore`]: list users,
//! list one page of posts (joined with authors), delete a post by id. Two
//! clients live here:
//!
//! - [`MemoryStore`], an in-process store with fixtures and fault injection,
//!   used by tests and the demo.
//! - [`HttpStore`], a client of the upstream REST surface.
//!
//! # Invariants
//!
//! - Posts list newest first (descending id), matching the upstream order.
//! - Deletes are idempotent by key: a missing id reports
//!   [`StoreError::NotFound`], never a generic failure.

use async_trait::async_trait;
use ffeed_core::{DeleteReceipt, FeedQuery, Page, PostId, PostWithAuthor, User};

pub mod error;
pub mod http;
pub mod memory;

pub use error::{Result, StoreError};
pub use http::HttpStore;
pub use memory::MemoryStore;

/// Operations the external data store exposes to this client.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All known users, for the author filter.
    async fn users(&self) -> Result<Vec<User>>;

    /// One page of posts matching `query`, newest first.
    async fn posts(&self, query: &FeedQuery) -> Result<Page<PostWithAuthor>>;

    /// Delete one post by id.
    async fn delete_post(&self, id: PostId) -> Result<DeleteReceipt>;
}
