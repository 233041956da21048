// Maintenance Catalog Store Port (Interface)

use crate::domain::CatalogItem;
use crate::error::Result;
use async_trait::async_trait;

/// Read access to the master list of maintenance operations
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List catalog items ordered by name
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<CatalogItem>>;

    /// Find catalog item by ID
    async fn get(&self, id: &str) -> Result<Option<CatalogItem>>;
}
