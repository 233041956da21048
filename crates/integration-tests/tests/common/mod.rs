//! Shared wiring for integration tests: SQLite stores behind the scheduler

#![allow(dead_code)]

use std::sync::Arc;

use carmaint_core::application::{MaintenanceScheduler, MaintenanceStores, SchedulerConfig};
use carmaint_core::domain::{CatalogItem, Vehicle};
use carmaint_core::port::id_provider::SequenceIdProvider;
use carmaint_core::port::time_provider::FixedTimeProvider;
use carmaint_core::port::TransactionalServiceHistory;
use carmaint_infra_sqlite::{
    create_pool, run_migrations, SqliteCatalogStore, SqliteServiceHistoryStore,
    SqliteTrackedItemStore, SqliteVehicleLookup,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub const OWNER: &str = "owner-1";
pub const STRANGER: &str = "owner-2";
pub const CAR: &str = "car-1";
pub const NOW: i64 = 1_700_000_000_000;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn memory_pool() -> SqlitePool {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

/// Vehicle `CAR` of `OWNER` at `odometer` km
pub async fn add_car(pool: &SqlitePool, odometer: i64) {
    SqliteVehicleLookup::new(pool.clone())
        .upsert(&Vehicle::new(CAR, OWNER, odometer))
        .await
        .unwrap();
}

pub async fn add_catalog(pool: &SqlitePool, id: &str, name: &str, interval: i64) {
    SqliteCatalogStore::new(pool.clone())
        .insert(&CatalogItem::new(id, name, interval))
        .await
        .unwrap();
}

pub fn stores(pool: &SqlitePool) -> MaintenanceStores {
    let history = Arc::new(SqliteServiceHistoryStore::new(pool.clone()));
    MaintenanceStores {
        vehicles: Arc::new(SqliteVehicleLookup::new(pool.clone())),
        catalog: Arc::new(SqliteCatalogStore::new(pool.clone())),
        tracked_items: Arc::new(SqliteTrackedItemStore::new(pool.clone())),
        history: history.clone(),
        history_tx: history,
    }
}

pub fn scheduler_with(
    stores: MaintenanceStores,
    history_tx: Option<Arc<dyn TransactionalServiceHistory>>,
) -> MaintenanceScheduler {
    let stores = match history_tx {
        Some(history_tx) => MaintenanceStores {
            history_tx,
            ..stores
        },
        None => stores,
    };
    MaintenanceScheduler::new(
        stores,
        Arc::new(SequenceIdProvider::new("id")),
        Arc::new(FixedTimeProvider(NOW)),
        SchedulerConfig::default(),
    )
}

pub fn scheduler(pool: &SqlitePool) -> MaintenanceScheduler {
    scheduler_with(stores(pool), None)
}
