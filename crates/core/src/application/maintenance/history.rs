// Service History Use Cases - read and correct recorded events

use crate::application::maintenance::record_service::load_owned;
use crate::domain::{ServiceEvent, ServiceEventPatch};
use crate::error::{AppError, Result};
use crate::port::{ServiceHistoryStore, TrackedItemStore};
use tracing::info;

pub const SERVICE_RECORD_NOT_FOUND: &str = "service record not found";

/// Events of an owned tracked item, newest service date first
pub async fn list(
    tracked_items: &dyn TrackedItemStore,
    history: &dyn ServiceHistoryStore,
    owner_id: &str,
    tracked_item_id: &str,
) -> Result<Vec<ServiceEvent>> {
    load_owned(tracked_items, owner_id, tracked_item_id).await?;
    history.list_by_tracked_item(tracked_item_id).await
}

/// Correct a recorded event
///
/// The tracked item's checkpoint is left as it is.
pub async fn update(
    tracked_items: &dyn TrackedItemStore,
    history: &dyn ServiceHistoryStore,
    owner_id: &str,
    event_id: &str,
    patch: &ServiceEventPatch,
) -> Result<ServiceEvent> {
    patch.validate()?;

    let not_found = || AppError::NotFound(SERVICE_RECORD_NOT_FOUND.to_string());

    let event = history.get(event_id).await?.ok_or_else(not_found)?;
    let owned = tracked_items
        .get(&event.tracked_item_id)
        .await?
        .is_some_and(|view| view.item.is_owned_by(owner_id));
    if !owned {
        return Err(not_found());
    }

    let updated = history.update(event_id, patch).await?.ok_or_else(not_found)?;

    info!(
        event_id = %updated.id,
        tracked_item_id = %updated.tracked_item_id,
        "Service record corrected"
    );
    Ok(updated)
}
