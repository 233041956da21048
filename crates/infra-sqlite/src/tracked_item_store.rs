// SQLite TrackedItemStore Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use carmaint_core::domain::{CatalogItem, TrackedItem, TrackedItemPatch, TrackedItemView};
use carmaint_core::error::Result;
use carmaint_core::port::TrackedItemStore;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

const SELECT_VIEW: &str = r#"
    SELECT t.id, t.owner_id, t.vehicle_id, t.catalog_item_id, t.custom_interval,
           t.last_service_odometer, t.last_service_date, t.created_at, t.updated_at,
           c.name AS catalog_name, c.default_interval AS catalog_default_interval
    FROM tracked_items t
    JOIN catalog_items c ON c.id = t.catalog_item_id
"#;

pub struct SqliteTrackedItemStore {
    pool: SqlitePool,
}

impl SqliteTrackedItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackedItemStore for SqliteTrackedItemStore {
    async fn list_by_vehicle(
        &self,
        owner_id: &str,
        vehicle_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<TrackedItemView>> {
        let sql = format!(
            "{} WHERE t.owner_id = ? AND t.vehicle_id = ? \
             ORDER BY t.created_at ASC, t.rowid ASC LIMIT ? OFFSET ?",
            SELECT_VIEW
        );
        let rows = sqlx::query_as::<_, TrackedItemViewRow>(&sql)
            .bind(owner_id)
            .bind(vehicle_id)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_view()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<TrackedItemView>> {
        let sql = format!("{} WHERE t.id = ?", SELECT_VIEW);
        let row = sqlx::query_as::<_, TrackedItemViewRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_view()))
    }

    async fn create(&self, item: &TrackedItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tracked_items (
                id, owner_id, vehicle_id, catalog_item_id, custom_interval,
                last_service_odometer, last_service_date, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.owner_id)
        .bind(&item.vehicle_id)
        .bind(&item.catalog_item_id)
        .bind(item.custom_interval)
        .bind(item.last_service_odometer)
        .bind(item.last_service_date)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(
        &self,
        id: &str,
        patch: &TrackedItemPatch,
        updated_at: i64,
    ) -> Result<Option<TrackedItem>> {
        patch.validate()?;

        // Single statement: the write lock is taken before the row is read.
        // The table CHECK rejects a half checkpoint.
        let row = sqlx::query_as::<_, TrackedItemRow>(
            r#"
            UPDATE tracked_items
            SET custom_interval = COALESCE(?, custom_interval),
                last_service_odometer = COALESCE(?, last_service_odometer),
                last_service_date = COALESCE(?, last_service_date),
                updated_at = ?
            WHERE id = ?
            RETURNING id, owner_id, vehicle_id, catalog_item_id, custom_interval,
                      last_service_odometer, last_service_date, created_at, updated_at
            "#,
        )
        .bind(patch.custom_interval)
        .bind(patch.last_service_odometer)
        .bind(patch.last_service_date)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_item()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        // service_events rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM tracked_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(tracked_item_id = %id, rows = result.rows_affected(), "Tracked item delete");
        Ok(result.rows_affected() > 0)
    }
}

/// SQLite row representation of `tracked_items`
#[derive(Debug, sqlx::FromRow)]
struct TrackedItemRow {
    id: String,
    owner_id: String,
    vehicle_id: String,
    catalog_item_id: String,
    custom_interval: Option<i64>,
    last_service_odometer: Option<i64>,
    last_service_date: Option<NaiveDate>,
    created_at: i64,
    updated_at: i64,
}

impl TrackedItemRow {
    fn into_item(self) -> TrackedItem {
        TrackedItem {
            id: self.id,
            owner_id: self.owner_id,
            vehicle_id: self.vehicle_id,
            catalog_item_id: self.catalog_item_id,
            custom_interval: self.custom_interval,
            last_service_odometer: self.last_service_odometer,
            last_service_date: self.last_service_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Tracked item joined with its catalog item
#[derive(Debug, sqlx::FromRow)]
struct TrackedItemViewRow {
    #[sqlx(flatten)]
    item: TrackedItemRow,
    catalog_name: String,
    catalog_default_interval: i64,
}

impl TrackedItemViewRow {
    fn into_view(self) -> TrackedItemView {
        let catalog_item = CatalogItem {
            id: self.item.catalog_item_id.clone(),
            name: self.catalog_name,
            default_interval: self.catalog_default_interval,
        };
        TrackedItemView {
            item: self.item.into_item(),
            catalog_item,
        }
    }
}
