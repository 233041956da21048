// Default catalog seeding

use crate::error::map_sqlx_error;
use carmaint_core::domain::DEFAULT_CATALOG;
use carmaint_core::error::Result;
use carmaint_core::port::IdProvider;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Insert the default catalog when `catalog_items` is empty
///
/// # Returns
/// Number of inserted items (0 when the catalog already had rows)
pub async fn seed_catalog(pool: &SqlitePool, id_provider: &dyn IdProvider) -> Result<u64> {
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

    if existing > 0 {
        debug!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for (name, default_interval) in DEFAULT_CATALOG {
        sqlx::query("INSERT INTO catalog_items (id, name, default_interval) VALUES (?, ?, ?)")
            .bind(id_provider.generate_id())
            .bind(*name)
            .bind(*default_interval)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        inserted += 1;
    }

    tx.commit().await.map_err(map_sqlx_error)?;

    info!(inserted, "Default maintenance catalog seeded");
    Ok(inserted)
}
