use ffeed_core::PostId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures the store boundary can report.
///
/// Variants are cloneable values so coordinator state can hold the last
/// failure while callbacks receive it too.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Post {0} not found")]
    NotFound(PostId),

    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("{message}")]
    Other { message: String },
}

impl StoreError {
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether retrying the same call could succeed without any fix on the
    /// caller's side.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}
