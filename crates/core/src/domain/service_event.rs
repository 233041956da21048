// Service Event Domain Model (append-only history)

use super::error::{ensure_odometer, Result};
use super::tracked_item::TrackedItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Service event ID (UUID v4)
pub type ServiceEventId = String;

/// One "mark as serviced" action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEvent {
    pub id: ServiceEventId,
    pub tracked_item_id: TrackedItemId,
    pub service_date: NaiveDate,
    pub service_odometer: i64,
    pub comment: Option<String>,
    pub photo_ref: Option<String>,
    pub created_at: i64, // epoch ms
}

impl ServiceEvent {
    pub fn new(
        id: impl Into<String>,
        created_at: i64,
        tracked_item_id: impl Into<String>,
        service_date: NaiveDate,
        service_odometer: i64,
    ) -> Self {
        Self {
            id: id.into(),
            tracked_item_id: tracked_item_id.into(),
            service_date,
            service_odometer,
            comment: None,
            photo_ref: None,
            created_at,
        }
    }

    /// Apply an explicit correction
    pub fn merge(&mut self, patch: &ServiceEventPatch) -> Result<()> {
        patch.validate()?;

        if let Some(date) = patch.service_date {
            self.service_date = date;
        }
        if let Some(odometer) = patch.service_odometer {
            self.service_odometer = odometer;
        }
        if let Some(comment) = &patch.comment {
            self.comment = Some(comment.clone());
        }
        Ok(())
    }
}

/// Correction of a recorded event (None = leave unchanged)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEventPatch {
    #[serde(default)]
    pub service_date: Option<NaiveDate>,
    #[serde(default)]
    pub service_odometer: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ServiceEventPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(odometer) = self.service_odometer {
            ensure_odometer(odometer)?;
        }
        Ok(())
    }
}

/// Default comment embedding the service date, e.g. "Обслуживание выполнено 01.05.2024"
pub fn default_comment(service_date: NaiveDate) -> String {
    format!("Обслуживание выполнено {}", service_date.format("%d.%m.%Y"))
}
