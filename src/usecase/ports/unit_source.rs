use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::unit::{DeleteReceipt, MutationReceipt, Unit, UnitDraft, UnitId};

/// Friendly text shown for any failed call to the units service.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to load units. Check that the units service is running and try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("HTTP error! status: {status} ({url})")]
    Status { url: String, status: u16 },
    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
}

impl FetchError {
    /// Short machine-readable tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::Status { .. } => "status",
            FetchError::Malformed { .. } => "malformed",
        }
    }

    /// The one message surfaced to users regardless of the failure kind.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

#[async_trait]
pub trait UnitSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Unit>, FetchError>;
    async fn fetch_single(&self, id: &UnitId) -> Result<Unit, FetchError>;

    async fn create(&self, draft: UnitDraft) -> Result<MutationReceipt, FetchError>;
    async fn update(&self, id: &UnitId, draft: UnitDraft) -> Result<MutationReceipt, FetchError>;
    async fn delete(&self, id: &UnitId) -> Result<DeleteReceipt, FetchError>;
}
