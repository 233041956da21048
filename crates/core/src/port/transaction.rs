// Transaction port for atomic multi-step operations

use crate::domain::ServiceEvent;
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Opens the storage transaction used by record-service
#[async_trait]
pub trait TransactionalServiceHistory: Send + Sync {
    /// Begin a new transaction
    async fn begin_service_transaction(&self) -> Result<Box<dyn ServiceRecordingTransaction>>;
}

/// Writes that must become visible together
///
/// Dropping the transaction without commit discards both writes.
#[async_trait]
pub trait ServiceRecordingTransaction: Transaction {
    /// Append the event (within transaction)
    async fn append_event(&mut self, event: &ServiceEvent) -> Result<()>;

    /// Overwrite the tracked item's checkpoint (within transaction)
    ///
    /// Fails with NotFound if the tracked item no longer exists.
    async fn apply_checkpoint(
        &mut self,
        tracked_item_id: &str,
        odometer: i64,
        date: NaiveDate,
        updated_at: i64,
    ) -> Result<()>;
}
