// Service History Store Port (Interface)

use crate::domain::{ServiceEvent, ServiceEventPatch};
use crate::error::Result;
use async_trait::async_trait;

/// Append-only store of service events
#[async_trait]
pub trait ServiceHistoryStore: Send + Sync {
    /// Events of one tracked item, newest service date first
    async fn list_by_tracked_item(&self, tracked_item_id: &str) -> Result<Vec<ServiceEvent>>;

    /// Find event by ID
    async fn get(&self, id: &str) -> Result<Option<ServiceEvent>>;

    /// Append a new event
    async fn create(&self, event: &ServiceEvent) -> Result<()>;

    /// Explicit correction of a recorded event
    async fn update(&self, id: &str, patch: &ServiceEventPatch) -> Result<Option<ServiceEvent>>;
}
