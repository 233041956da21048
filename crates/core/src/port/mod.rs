// Port Layer - Interfaces for external dependencies

pub mod catalog_store;
pub mod id_provider; // For deterministic testing
pub mod service_history_store;
pub mod time_provider;
pub mod tracked_item_store;
pub mod transaction;
pub mod vehicle_lookup;

// Re-exports
pub use catalog_store::CatalogStore;
pub use id_provider::IdProvider;
pub use service_history_store::ServiceHistoryStore;
pub use time_provider::TimeProvider;
pub use tracked_item_store::TrackedItemStore;
pub use transaction::{ServiceRecordingTransaction, Transaction, TransactionalServiceHistory};
pub use vehicle_lookup::VehicleLookup;
