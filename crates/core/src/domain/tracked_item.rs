// Tracked Item Domain Model

use super::catalog::{CatalogItem, CatalogItemId};
use super::error::{ensure_odometer, ensure_positive_interval, DomainError, Result};
use super::vehicle::{OwnerId, Vehicle, VehicleId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Tracked item ID (UUID v4)
pub type TrackedItemId = String;

/// A catalog item attached to one owner's vehicle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItem {
    pub id: TrackedItemId,
    pub owner_id: OwnerId,
    pub vehicle_id: VehicleId,
    pub catalog_item_id: CatalogItemId,

    pub custom_interval: Option<i64>, // km, overrides catalog default

    // Checkpoint: both set or both unset
    pub last_service_odometer: Option<i64>,
    pub last_service_date: Option<NaiveDate>,

    pub created_at: i64, // epoch ms
    pub updated_at: i64, // epoch ms
}

impl TrackedItem {
    /// Create a never-serviced tracked item
    ///
    /// # Arguments
    ///
    /// * `id` - Unique id (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        owner_id: impl Into<String>,
        vehicle_id: impl Into<String>,
        catalog_item_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            vehicle_id: vehicle_id.into(),
            catalog_item_id: catalog_item_id.into(),
            custom_interval: None,
            last_service_odometer: None,
            last_service_date: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    /// Custom interval if set, else the catalog default
    pub fn effective_interval(&self, default_interval: i64) -> i64 {
        self.custom_interval.unwrap_or(default_interval)
    }

    /// Overwrite the checkpoint with a freshly recorded service
    pub fn apply_checkpoint(&mut self, odometer: i64, date: NaiveDate, now_millis: i64) {
        self.last_service_odometer = Some(odometer);
        self.last_service_date = Some(date);
        self.updated_at = now_millis;
    }

    /// Merge a partial update; unsupplied fields stay untouched
    pub fn merge(&mut self, patch: &TrackedItemPatch, now_millis: i64) -> Result<()> {
        patch.validate()?;

        let odometer = patch.last_service_odometer.or(self.last_service_odometer);
        let date = patch.last_service_date.or(self.last_service_date);
        if odometer.is_some() != date.is_some() {
            return Err(DomainError::IncompleteCheckpoint);
        }

        if let Some(interval) = patch.custom_interval {
            self.custom_interval = Some(interval);
        }
        self.last_service_odometer = odometer;
        self.last_service_date = date;
        self.updated_at = now_millis;
        Ok(())
    }
}

/// Merge-patch for a tracked item (None = leave unchanged)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItemPatch {
    #[serde(default)]
    pub custom_interval: Option<i64>,
    #[serde(default)]
    pub last_service_odometer: Option<i64>,
    #[serde(default)]
    pub last_service_date: Option<NaiveDate>,
}

impl TrackedItemPatch {
    pub fn custom_interval(interval: i64) -> Self {
        Self {
            custom_interval: Some(interval),
            ..Default::default()
        }
    }

    pub fn checkpoint(odometer: i64, date: NaiveDate) -> Self {
        Self {
            last_service_odometer: Some(odometer),
            last_service_date: Some(date),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.custom_interval.is_none()
            && self.last_service_odometer.is_none()
            && self.last_service_date.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(interval) = self.custom_interval {
            ensure_positive_interval(interval)?;
        }
        if let Some(odometer) = self.last_service_odometer {
            ensure_odometer(odometer)?;
        }
        Ok(())
    }
}

/// Tracked item joined with its catalog item (explicit eager fetch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItemView {
    pub item: TrackedItem,
    pub catalog_item: CatalogItem,
}

impl TrackedItemView {
    pub fn effective_interval(&self) -> i64 {
        self.item.effective_interval(self.catalog_item.default_interval)
    }
}

/// Tracked item with catalog and vehicle, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItemDetails {
    pub item: TrackedItem,
    pub catalog_item: CatalogItem,
    pub vehicle: Vehicle,
}
