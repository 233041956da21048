// Tracking Use Cases - track, untrack, partial update, catalog directory

use crate::application::display::{item_icon, matches_search};
use crate::application::maintenance::record_service::{load_owned, TRACKED_ITEM_NOT_FOUND};
use crate::application::maintenance::SchedulerConfig;
use crate::domain::error::ensure_positive_interval;
use crate::domain::{
    CatalogItem, TrackedItem, TrackedItemId, TrackedItemPatch, TrackedItemView, Vehicle,
};
use crate::error::{AppError, Result};
use crate::port::{CatalogStore, IdProvider, TimeProvider, TrackedItemStore, VehicleLookup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Track request: attach a catalog item to a vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItemRequest {
    pub vehicle_id: String,
    pub catalog_item_id: String,

    #[serde(default)]
    pub custom_interval: Option<i64>,
}

/// One row of the catalog directory view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDirectoryEntry {
    pub catalog_item: CatalogItem,
    pub icon: String,
    /// The caller's tracked item for this catalog item, if any
    pub tracked_item_id: Option<TrackedItemId>,
}

impl CatalogDirectoryEntry {
    pub fn is_tracked(&self) -> bool {
        self.tracked_item_id.is_some()
    }
}

/// Vehicle owned by `owner_id`, NotFound otherwise
pub(crate) async fn load_owned_vehicle(
    vehicles: &dyn VehicleLookup,
    owner_id: &str,
    vehicle_id: &str,
) -> Result<Vehicle> {
    vehicles
        .get(vehicle_id)
        .await?
        .filter(|v| v.is_owned_by(owner_id))
        .ok_or_else(|| AppError::NotFound(format!("vehicle {} not found", vehicle_id)))
}

/// Start tracking a catalog item for a vehicle
///
/// Duplicate tracking of the same catalog item is allowed.
#[allow(clippy::too_many_arguments)]
pub async fn track(
    vehicles: &dyn VehicleLookup,
    catalog: &dyn CatalogStore,
    tracked_items: &dyn TrackedItemStore,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    owner_id: &str,
    req: TrackItemRequest,
) -> Result<TrackedItemView> {
    if req.vehicle_id.trim().is_empty() || req.catalog_item_id.trim().is_empty() {
        return Err(AppError::Validation(
            "vehicle_id and catalog_item_id must not be empty".to_string(),
        ));
    }
    if let Some(interval) = req.custom_interval {
        ensure_positive_interval(interval)?;
    }

    load_owned_vehicle(vehicles, owner_id, &req.vehicle_id).await?;
    let catalog_item = catalog
        .get(&req.catalog_item_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("catalog item {} not found", req.catalog_item_id))
        })?;

    let mut item = TrackedItem::new(
        id_provider.generate_id(),
        time_provider.now_millis(),
        owner_id,
        req.vehicle_id,
        req.catalog_item_id,
    );
    item.custom_interval = req.custom_interval;

    tracked_items.create(&item).await?;

    info!(
        tracked_item_id = %item.id,
        vehicle_id = %item.vehicle_id,
        catalog_item = %catalog_item.name,
        "Tracking started"
    );

    Ok(TrackedItemView { item, catalog_item })
}

/// Stop tracking; false when nothing owned by the caller matched
pub async fn untrack(
    tracked_items: &dyn TrackedItemStore,
    owner_id: &str,
    tracked_item_id: &str,
) -> Result<bool> {
    if tracked_item_id.trim().is_empty() {
        return Err(AppError::Validation(
            "tracked_item_id must not be empty".to_string(),
        ));
    }

    let owned = tracked_items
        .get(tracked_item_id)
        .await?
        .is_some_and(|view| view.item.is_owned_by(owner_id));
    if !owned {
        debug!(tracked_item_id = %tracked_item_id, "Untrack skipped: no matching tracked item");
        return Ok(false);
    }

    let deleted = tracked_items.delete(tracked_item_id).await?;
    if deleted {
        info!(tracked_item_id = %tracked_item_id, "Tracking stopped");
    }
    Ok(deleted)
}

/// Merge-patch custom interval and/or checkpoint
pub async fn update(
    tracked_items: &dyn TrackedItemStore,
    time_provider: &dyn TimeProvider,
    owner_id: &str,
    tracked_item_id: &str,
    patch: &TrackedItemPatch,
) -> Result<TrackedItemView> {
    patch.validate()?;

    let current = load_owned(tracked_items, owner_id, tracked_item_id).await?;
    if patch.is_empty() {
        return Ok(current);
    }

    let now = time_provider.now_millis();

    // Check the merged result before writing
    let mut merged = current.item.clone();
    merged.merge(patch, now)?;

    let stored = tracked_items
        .update(tracked_item_id, patch, now)
        .await?
        .ok_or_else(|| AppError::NotFound(TRACKED_ITEM_NOT_FOUND.to_string()))?;

    debug!(
        tracked_item_id = %tracked_item_id,
        custom_interval = ?stored.custom_interval,
        "Tracked item updated"
    );

    Ok(TrackedItemView {
        item: stored,
        catalog_item: current.catalog_item,
    })
}

/// Tracked items of an owned vehicle (page of the raw list)
pub async fn list(
    vehicles: &dyn VehicleLookup,
    tracked_items: &dyn TrackedItemStore,
    owner_id: &str,
    vehicle_id: &str,
    skip: i64,
    limit: i64,
) -> Result<Vec<TrackedItemView>> {
    load_owned_vehicle(vehicles, owner_id, vehicle_id).await?;
    tracked_items
        .list_by_vehicle(owner_id, vehicle_id, skip.max(0), limit.max(0))
        .await
}

/// Every catalog item with its icon and tracking state for one vehicle
#[allow(clippy::too_many_arguments)]
pub async fn directory(
    vehicles: &dyn VehicleLookup,
    catalog: &dyn CatalogStore,
    tracked_items: &dyn TrackedItemStore,
    config: &SchedulerConfig,
    owner_id: &str,
    vehicle_id: &str,
    search: Option<&str>,
    tracked_only: bool,
) -> Result<Vec<CatalogDirectoryEntry>> {
    load_owned_vehicle(vehicles, owner_id, vehicle_id).await?;

    let all_items = catalog.list(0, config.catalog_directory_limit).await?;
    let tracked: HashMap<String, TrackedItemId> = tracked_items
        .list_by_vehicle(owner_id, vehicle_id, 0, config.catalog_directory_limit)
        .await?
        .into_iter()
        .map(|view| (view.item.catalog_item_id, view.item.id))
        .collect();

    let entries = all_items
        .into_iter()
        .filter(|item| matches_search(&item.name, search))
        .map(|item| CatalogDirectoryEntry {
            icon: item_icon(&item.name).to_string(),
            tracked_item_id: tracked.get(&item.id).cloned(),
            catalog_item: item,
        })
        .filter(|entry| !tracked_only || entry.is_tracked())
        .collect();

    Ok(entries)
}
