// Carmaint Infrastructure - SQLite Adapter
// Implements: VehicleLookup, CatalogStore, TrackedItemStore,
// ServiceHistoryStore, TransactionalServiceHistory

mod catalog_store;
mod connection;
mod error;
mod migration;
mod seed;
mod service_history_store;
mod tracked_item_store;
mod transaction;
mod vehicle_lookup;

pub use catalog_store::SqliteCatalogStore;
pub use connection::create_pool;
pub use migration::run_migrations;
pub use seed::seed_catalog;
pub use service_history_store::SqliteServiceHistoryStore;
pub use tracked_item_store::SqliteTrackedItemStore;
pub use transaction::SqliteServiceTransaction;
pub use vehicle_lookup::SqliteVehicleLookup;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
