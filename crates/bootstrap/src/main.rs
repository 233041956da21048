//! Carmaint - maintenance scheduler composition root
//!
//! Opens the database, applies migrations, seeds the default catalog and,
//! when a report target is configured, prints its due list as JSON.

mod config;

use anyhow::Result;
use carmaint_core::application::{MaintenanceScheduler, MaintenanceStores};
use carmaint_core::port::id_provider::UuidProvider;
use carmaint_core::port::time_provider::SystemTimeProvider;
use carmaint_infra_sqlite::{
    create_pool, run_migrations, seed_catalog, SqliteCatalogStore, SqliteServiceHistoryStore,
    SqliteTrackedItemStore, SqliteVehicleLookup,
};
use config::{BootstrapConfig, LogFormat, ReportTarget};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = BootstrapConfig::from_env()?;

    // 2. Initialize logging
    init_logging(config.log_format)?;
    info!("Carmaint v{} starting...", VERSION);

    // 3. Initialize database
    if !config.is_in_memory() {
        if let Some(parent) = Path::new(&config.db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
    }
    info!(db_path = %config.db_path, "Initializing database...");

    let pool = create_pool(&config.db_path)
        .await
        .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
    run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

    let id_provider = Arc::new(UuidProvider);
    let seeded = seed_catalog(&pool, id_provider.as_ref()).await?;
    if seeded > 0 {
        info!(seeded, "Catalog initialized");
    }

    // 4. Setup dependencies (DI wiring)
    let history = Arc::new(SqliteServiceHistoryStore::new(pool.clone()));
    let stores = MaintenanceStores {
        vehicles: Arc::new(SqliteVehicleLookup::new(pool.clone())),
        catalog: Arc::new(SqliteCatalogStore::new(pool.clone())),
        tracked_items: Arc::new(SqliteTrackedItemStore::new(pool.clone())),
        history: history.clone(),
        history_tx: history,
    };
    let scheduler = MaintenanceScheduler::new(
        stores,
        id_provider,
        Arc::new(SystemTimeProvider),
        config.scheduler.clone(),
    );

    // 5. Optional due report
    match &config.report {
        Some(target) => print_due_report(&scheduler, target).await?,
        None => info!("No report target configured (CARMAINT_REPORT_OWNER/CARMAINT_REPORT_VEHICLE)"),
    }

    pool.close().await;
    info!("Done.");
    Ok(())
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("carmaint=info"))?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

async fn print_due_report(scheduler: &MaintenanceScheduler, target: &ReportTarget) -> Result<()> {
    let page_size = scheduler.config().default_page_size;
    let due_count = scheduler
        .get_due_count(&target.owner_id, &target.vehicle_id)
        .await?;
    let page = scheduler
        .get_due_items(&target.owner_id, &target.vehicle_id, 1, page_size, false)
        .await?;

    if page.pagination.total_items == 0 {
        warn!(
            owner_id = %target.owner_id,
            vehicle_id = %target.vehicle_id,
            "Nothing due (or vehicle not visible to this owner)"
        );
    }
    info!(
        vehicle_id = %target.vehicle_id,
        due_count,
        total_pages = page.pagination.total_pages,
        "Due report"
    );

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
