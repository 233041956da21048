// SQLite CatalogStore Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use carmaint_core::domain::CatalogItem;
use carmaint_core::error::Result;
use carmaint_core::port::CatalogStore;
use sqlx::SqlitePool;

pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Add a catalog entry (administrative path, not part of the port)
    pub async fn insert(&self, item: &CatalogItem) -> Result<()> {
        sqlx::query("INSERT INTO catalog_items (id, name, default_interval) VALUES (?, ?, ?)")
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.default_interval)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<CatalogItem>> {
        let rows = sqlx::query_as::<_, CatalogRow>(
            r#"
            SELECT id, name, default_interval
            FROM catalog_items
            ORDER BY name ASC, id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_catalog_item()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<CatalogItem>> {
        let row = sqlx::query_as::<_, CatalogRow>(
            "SELECT id, name, default_interval FROM catalog_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_catalog_item()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogRow {
    id: String,
    name: String,
    default_interval: i64,
}

impl CatalogRow {
    fn into_catalog_item(self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name,
            default_interval: self.default_interval,
        }
    }
}
