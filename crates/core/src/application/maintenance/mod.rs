// Maintenance Scheduler - orchestrates status computation and service recording

pub mod config;
pub mod due_items;
pub mod history;
pub mod record_service;
pub mod tracking;

#[cfg(test)]
mod test_support;

pub use config::SchedulerConfig;
pub use due_items::{DueItemsPage, DueItemsQuery};
pub use record_service::RecordServiceRequest;
pub use tracking::{CatalogDirectoryEntry, TrackItemRequest};

use crate::domain::{
    CatalogItem, ServiceEvent, ServiceEventPatch, TrackedItemDetails, TrackedItemPatch,
    TrackedItemView,
};
use crate::error::{AppError, Result};
use crate::port::{
    CatalogStore, IdProvider, ServiceHistoryStore, TimeProvider, TrackedItemStore,
    TransactionalServiceHistory, VehicleLookup,
};
use std::sync::Arc;

/// Storage collaborators consumed by the scheduler
#[derive(Clone)]
pub struct MaintenanceStores {
    pub vehicles: Arc<dyn VehicleLookup>,
    pub catalog: Arc<dyn CatalogStore>,
    pub tracked_items: Arc<dyn TrackedItemStore>,
    pub history: Arc<dyn ServiceHistoryStore>,
    pub history_tx: Arc<dyn TransactionalServiceHistory>,
}

/// Maintenance Scheduler
pub struct MaintenanceScheduler {
    stores: MaintenanceStores,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    config: SchedulerConfig,
}

impl MaintenanceScheduler {
    pub fn new(
        stores: MaintenanceStores,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            stores,
            id_provider,
            time_provider,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Items needing attention (or all items with `show_all`), one page
    pub async fn get_due_items(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        page: u32,
        page_size: u32,
        show_all: bool,
    ) -> Result<DueItemsPage> {
        let query = DueItemsQuery::new(vehicle_id, page, page_size).show_all(show_all);
        self.query_due_items(owner_id, &query).await
    }

    /// Due items with optional search text and category
    pub async fn query_due_items(
        &self,
        owner_id: &str,
        query: &DueItemsQuery,
    ) -> Result<DueItemsPage> {
        due_items::execute(
            self.stores.vehicles.as_ref(),
            self.stores.tracked_items.as_ref(),
            owner_id,
            query,
        )
        .await
    }

    /// Badge count: items that are never serviced, upcoming or overdue
    pub async fn get_due_count(&self, owner_id: &str, vehicle_id: &str) -> Result<usize> {
        due_items::count(
            self.stores.vehicles.as_ref(),
            self.stores.tracked_items.as_ref(),
            owner_id,
            vehicle_id,
        )
        .await
    }

    /// Mark a tracked item as serviced
    pub async fn record_service(
        &self,
        owner_id: &str,
        req: RecordServiceRequest,
    ) -> Result<TrackedItemDetails> {
        record_service::execute(
            self.stores.vehicles.as_ref(),
            self.stores.tracked_items.as_ref(),
            self.stores.history_tx.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            &self.config,
            owner_id,
            req,
        )
        .await
    }

    /// Start tracking a catalog item for a vehicle
    pub async fn track_item(
        &self,
        owner_id: &str,
        req: TrackItemRequest,
    ) -> Result<TrackedItemView> {
        tracking::track(
            self.stores.vehicles.as_ref(),
            self.stores.catalog.as_ref(),
            self.stores.tracked_items.as_ref(),
            self.id_provider.as_ref(),
            self.time_provider.as_ref(),
            owner_id,
            req,
        )
        .await
    }

    /// Stop tracking (idempotent)
    pub async fn untrack_item(&self, owner_id: &str, tracked_item_id: &str) -> Result<bool> {
        tracking::untrack(self.stores.tracked_items.as_ref(), owner_id, tracked_item_id).await
    }

    /// Partial update of custom interval and/or checkpoint
    pub async fn update_custom_interval(
        &self,
        owner_id: &str,
        tracked_item_id: &str,
        patch: &TrackedItemPatch,
    ) -> Result<TrackedItemView> {
        tracking::update(
            self.stores.tracked_items.as_ref(),
            self.time_provider.as_ref(),
            owner_id,
            tracked_item_id,
            patch,
        )
        .await
    }

    /// Tracked item with catalog and vehicle
    pub async fn get_tracked_item(
        &self,
        owner_id: &str,
        tracked_item_id: &str,
    ) -> Result<TrackedItemDetails> {
        let view =
            record_service::load_owned(self.stores.tracked_items.as_ref(), owner_id, tracked_item_id)
                .await?;
        let vehicle = tracking::load_owned_vehicle(
            self.stores.vehicles.as_ref(),
            owner_id,
            &view.item.vehicle_id,
        )
        .await?;
        Ok(TrackedItemDetails {
            item: view.item,
            catalog_item: view.catalog_item,
            vehicle,
        })
    }

    /// Raw tracked item list of an owned vehicle
    pub async fn list_tracked_items(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TrackedItemView>> {
        tracking::list(
            self.stores.vehicles.as_ref(),
            self.stores.tracked_items.as_ref(),
            owner_id,
            vehicle_id,
            skip,
            limit,
        )
        .await
    }

    /// Catalog with icons and tracking state for one vehicle
    pub async fn catalog_directory(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        search: Option<&str>,
        tracked_only: bool,
    ) -> Result<Vec<CatalogDirectoryEntry>> {
        tracking::directory(
            self.stores.vehicles.as_ref(),
            self.stores.catalog.as_ref(),
            self.stores.tracked_items.as_ref(),
            &self.config,
            owner_id,
            vehicle_id,
            search,
            tracked_only,
        )
        .await
    }

    /// Catalog pass-through
    pub async fn list_catalog(&self, skip: i64, limit: i64) -> Result<Vec<CatalogItem>> {
        self.stores.catalog.list(skip.max(0), limit.max(0)).await
    }

    /// Catalog pass-through
    pub async fn get_catalog_item(&self, catalog_item_id: &str) -> Result<CatalogItem> {
        self.stores
            .catalog
            .get(catalog_item_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("catalog item {} not found", catalog_item_id))
            })
    }

    /// Service history of an owned tracked item
    pub async fn service_history(
        &self,
        owner_id: &str,
        tracked_item_id: &str,
    ) -> Result<Vec<ServiceEvent>> {
        history::list(
            self.stores.tracked_items.as_ref(),
            self.stores.history.as_ref(),
            owner_id,
            tracked_item_id,
        )
        .await
    }

    /// Correct a recorded service event
    pub async fn update_service_event(
        &self,
        owner_id: &str,
        event_id: &str,
        patch: &ServiceEventPatch,
    ) -> Result<ServiceEvent> {
        history::update(
            self.stores.tracked_items.as_ref(),
            self.stores.history.as_ref(),
            owner_id,
            event_id,
            patch,
        )
        .await
    }
}
