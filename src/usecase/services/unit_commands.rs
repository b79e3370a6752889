use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::unit::{DeleteReceipt, MutationReceipt, Unit, UnitDraft, UnitId};
use crate::usecase::ports::unit_source::{FetchError, UnitSource};

/// Single-unit calls against the units service. The service echoes
/// mutations without storing them, so callers keep their loaded collection.
pub struct UnitCommandService {
    source: Arc<dyn UnitSource>,
}

impl UnitCommandService {
    pub fn new(source: Arc<dyn UnitSource>) -> Self {
        Self { source }
    }

    pub async fn details(&self, id: &UnitId) -> Result<Unit, FetchError> {
        self.source.fetch_single(id).await.inspect_err(|err| log_failure("details", err))
    }

    pub async fn create(&self, draft: UnitDraft) -> Result<MutationReceipt, FetchError> {
        let receipt = self
            .source
            .create(draft)
            .await
            .inspect_err(|err| log_failure("create", err))?;
        info!(id = receipt.unit_id().unwrap_or_default(), "{}", receipt.message);
        Ok(receipt)
    }

    pub async fn update(&self, id: &UnitId, draft: UnitDraft) -> Result<MutationReceipt, FetchError> {
        let receipt = self
            .source
            .update(id, draft)
            .await
            .inspect_err(|err| log_failure("update", err))?;
        info!(id = %id, "{}", receipt.message);
        Ok(receipt)
    }

    pub async fn delete(&self, id: &UnitId) -> Result<DeleteReceipt, FetchError> {
        let receipt = self
            .source
            .delete(id)
            .await
            .inspect_err(|err| log_failure("delete", err))?;
        info!(id = %receipt.deleted_id, "{}", receipt.message);
        Ok(receipt)
    }
}

fn log_failure(operation: &str, err: &FetchError) {
    warn!(operation, kind = err.kind(), error = %err, "unit command failed");
}
