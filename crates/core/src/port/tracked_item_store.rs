// Tracked Item Store Port (Interface)

use crate::domain::{TrackedItem, TrackedItemPatch, TrackedItemView};
use crate::error::Result;
use async_trait::async_trait;

/// CRUD over tracked items (owner + vehicle + catalog item)
///
/// Reads always join the catalog item so callers never traverse
/// relationships lazily.
#[async_trait]
pub trait TrackedItemStore: Send + Sync {
    /// List tracked items of one owner's vehicle, in creation order
    async fn list_by_vehicle(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TrackedItemView>>;

    /// Find tracked item by ID
    async fn get(&self, id: &str) -> Result<Option<TrackedItemView>>;

    /// Insert a new tracked item
    async fn create(&self, item: &TrackedItem) -> Result<()>;

    /// Merge-patch a tracked item, returning the stored result
    ///
    /// `updated_at` is the timestamp to stamp on the row.
    async fn update(
        &self,
        id: &str,
        patch: &TrackedItemPatch,
        updated_at: i64,
    ) -> Result<Option<TrackedItem>>;

    /// Delete a tracked item and its history
    ///
    /// # Returns
    /// true if a row was deleted
    async fn delete(&self, id: &str) -> Result<bool>;
}
