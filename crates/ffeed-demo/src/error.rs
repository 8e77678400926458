use thiserror::Error;

use ffeed_runtime::UpdateError;
use ffeed_store::StoreError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("update error: {0}")]
    Update(#[from] UpdateError),

    #[error("scenario failed: {name}")]
    ScenarioFailed { name: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScenarioFailed { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn scenario_failed(name: impl Into<String>) -> Self {
        Self::ScenarioFailed { name: name.into() }
    }
}
