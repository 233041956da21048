// Record Service Use Case
//
// Appends a service event and moves the tracked item's checkpoint inside a
// single storage transaction.

use crate::application::maintenance::SchedulerConfig;
use crate::domain::error::ensure_odometer;
use crate::domain::{default_comment, ServiceEvent, TrackedItemDetails, TrackedItemView};
use crate::error::{AppError, Result};
use crate::port::{
    IdProvider, ServiceRecordingTransaction, TimeProvider, TrackedItemStore,
    TransactionalServiceHistory, VehicleLookup,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const TRACKED_ITEM_NOT_FOUND: &str = "tracked item not found";

/// "Mark as serviced" request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordServiceRequest {
    pub tracked_item_id: String,
    pub service_date: NaiveDate,

    /// Defaults to the vehicle's current odometer
    #[serde(default)]
    pub service_odometer: Option<i64>,

    /// Defaults to a generated comment when missing or blank
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub photo_ref: Option<String>,
}

impl RecordServiceRequest {
    pub fn new(tracked_item_id: impl Into<String>, service_date: NaiveDate) -> Self {
        Self {
            tracked_item_id: tracked_item_id.into(),
            service_date,
            service_odometer: None,
            comment: None,
            photo_ref: None,
        }
    }

    pub fn odometer(mut self, odometer: i64) -> Self {
        self.service_odometer = Some(odometer);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Reject malformed requests before any storage call
pub fn validate_request(req: &RecordServiceRequest) -> Result<()> {
    if req.tracked_item_id.trim().is_empty() {
        return Err(AppError::Validation(
            "tracked_item_id must not be empty".to_string(),
        ));
    }
    if let Some(odometer) = req.service_odometer {
        ensure_odometer(odometer)?;
    }
    Ok(())
}

/// Execute record-service (with transaction for atomicity)
///
/// # Arguments
///
/// * `vehicles` - Vehicle lookup (default odometer)
/// * `tracked_items` - Tracked item store (ownership check, reload)
/// * `history` - Transactional service history
/// * `id_provider` - ID generator (injected for determinism)
/// * `time_provider` - Time provider (injected for determinism)
/// * `config` - Scheduler configuration
/// * `owner_id` - Requesting owner
/// * `req` - Record service request
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    vehicles: &dyn VehicleLookup,
    tracked_items: &dyn TrackedItemStore,
    history: &dyn TransactionalServiceHistory,
    id_provider: &dyn IdProvider,
    time_provider: &dyn TimeProvider,
    config: &SchedulerConfig,
    owner_id: &str,
    req: RecordServiceRequest,
) -> Result<TrackedItemDetails> {
    validate_request(&req)?;

    let view = load_owned(tracked_items, owner_id, &req.tracked_item_id).await?;

    let vehicle = vehicles
        .get(&view.item.vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {} not found", view.item.vehicle_id)))?;

    let service_odometer = req.service_odometer.unwrap_or(vehicle.odometer);
    let comment = match req.comment {
        Some(c) if !c.trim().is_empty() => c,
        _ => default_comment(req.service_date),
    };

    if config.warn_on_odometer_regression {
        if let Some(previous) = view.item.last_service_odometer {
            if service_odometer < previous {
                warn!(
                    tracked_item_id = %view.item.id,
                    previous_odometer = previous,
                    service_odometer = service_odometer,
                    "Recorded odometer is below the previous checkpoint"
                );
            }
        }
    }

    let now = time_provider.now_millis();
    let mut event = ServiceEvent::new(
        id_provider.generate_id(),
        now,
        view.item.id.clone(),
        req.service_date,
        service_odometer,
    );
    event.comment = Some(comment);
    event.photo_ref = req.photo_ref;

    // Start transaction: event and checkpoint become visible together
    let mut tx = history.begin_service_transaction().await?;

    match write_service(tx.as_mut(), &event, now).await {
        Ok(()) => tx.commit().await?,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Rollback after failed service write also failed");
            }
            return Err(e);
        }
    }

    info!(
        tracked_item_id = %event.tracked_item_id,
        event_id = %event.id,
        service_odometer = event.service_odometer,
        service_date = %event.service_date,
        "Service recorded"
    );

    let refreshed = load_owned(tracked_items, owner_id, &event.tracked_item_id).await?;
    Ok(TrackedItemDetails {
        item: refreshed.item,
        catalog_item: refreshed.catalog_item,
        vehicle,
    })
}

async fn write_service(
    tx: &mut dyn ServiceRecordingTransaction,
    event: &ServiceEvent,
    now: i64,
) -> Result<()> {
    tx.append_event(event).await?;
    tx.apply_checkpoint(
        &event.tracked_item_id,
        event.service_odometer,
        event.service_date,
        now,
    )
    .await
}

/// Tracked item owned by `owner_id`, NotFound otherwise
pub(crate) async fn load_owned(
    tracked_items: &dyn TrackedItemStore,
    owner_id: &str,
    tracked_item_id: &str,
) -> Result<TrackedItemView> {
    tracked_items
        .get(tracked_item_id)
        .await?
        .filter(|view| view.item.is_owned_by(owner_id))
        .ok_or_else(|| AppError::NotFound(TRACKED_ITEM_NOT_FOUND.to_string()))
}
