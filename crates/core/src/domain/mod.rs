// Domain Layer - Pure business logic and entities

pub mod catalog;
pub mod error;
pub mod interval_policy;
pub mod service_event;
pub mod tracked_item;
pub mod vehicle;

// Re-exports
pub use catalog::{CatalogItem, CatalogItemId, DEFAULT_CATALOG};
pub use error::DomainError;
pub use interval_policy::{classify, lateness, Classification, MaintenanceStatus};
pub use service_event::{default_comment, ServiceEvent, ServiceEventId, ServiceEventPatch};
pub use tracked_item::{
    TrackedItem, TrackedItemDetails, TrackedItemId, TrackedItemPatch, TrackedItemView,
};
pub use vehicle::{OwnerId, Vehicle, VehicleId};
