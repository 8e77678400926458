#![forbid(unsafe_code)]

//! Records exposed by the external data store.
//!
//! Wire shapes match the upstream REST surface: camelCase keys, posts joined
//! with their author, and users stripped of anything but id and name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for a post record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author record as the store exposes it. Private fields such as the email
/// address never cross this boundary.
///
/// `name` is nullable in the source data; presentation-side fallbacks are the
/// widgets' concern, not this type's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
}

impl User {
    /// Convenience constructor for fixtures and tests.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: Some(name.into()),
        }
    }

    /// A user record that carries no name.
    #[must_use]
    pub const fn unnamed(id: i64) -> Self {
        Self {
            id: UserId(id),
            name: None,
        }
    }
}

/// A post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub body: String,
    pub author_id: UserId,
}

impl Post {
    /// Convenience constructor for fixtures and tests.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>, body: impl Into<String>, author_id: i64) -> Self {
        Self {
            id: PostId(id),
            title: title.into(),
            body: body.into(),
            author_id: UserId(author_id),
        }
    }
}

/// A post joined with its author, the shape listing endpoints return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    #[serde(flatten)]
    pub post: Post,
    pub author: User,
}

impl PostWithAuthor {
    #[must_use]
    pub fn new(post: Post, author: User) -> Self {
        Self { post, author }
    }

    /// Id of the underlying post.
    #[must_use]
    pub const fn id(&self) -> PostId {
        self.post.id
    }
}

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteReceipt {
    pub id: PostId,
    /// Human-readable confirmation, when the store supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteReceipt {
    #[must_use]
    pub const fn new(id: PostId) -> Self {
        Self { id, message: None }
    }

    /// Attach the store's confirmation text.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
