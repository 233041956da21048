// SQLite ServiceHistoryStore Implementation

use crate::error::map_sqlx_error;
use crate::SqliteServiceTransaction;
use async_trait::async_trait;
use carmaint_core::domain::{ServiceEvent, ServiceEventPatch};
use carmaint_core::error::Result;
use carmaint_core::port::{
    ServiceHistoryStore, ServiceRecordingTransaction, TransactionalServiceHistory,
};
use chrono::NaiveDate;
use sqlx::SqlitePool;

const SELECT_EVENT: &str = r#"
    SELECT id, tracked_item_id, service_date, service_odometer, comment, photo_ref, created_at
    FROM service_events
"#;

pub struct SqliteServiceHistoryStore {
    pool: SqlitePool,
}

impl SqliteServiceHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceHistoryStore for SqliteServiceHistoryStore {
    async fn list_by_tracked_item(&self, tracked_item_id: &str) -> Result<Vec<ServiceEvent>> {
        let sql = format!(
            "{} WHERE tracked_item_id = ? ORDER BY service_date DESC, created_at DESC, rowid DESC",
            SELECT_EVENT
        );
        let rows = sqlx::query_as::<_, ServiceEventRow>(&sql)
            .bind(tracked_item_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into_event()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<ServiceEvent>> {
        let sql = format!("{} WHERE id = ?", SELECT_EVENT);
        let row = sqlx::query_as::<_, ServiceEventRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_event()))
    }

    async fn create(&self, event: &ServiceEvent) -> Result<()> {
        insert_event(&self.pool, event).await
    }

    async fn update(&self, id: &str, patch: &ServiceEventPatch) -> Result<Option<ServiceEvent>> {
        patch.validate()?;

        let row = sqlx::query_as::<_, ServiceEventRow>(
            r#"
            UPDATE service_events
            SET service_date = COALESCE(?, service_date),
                service_odometer = COALESCE(?, service_odometer),
                comment = COALESCE(?, comment)
            WHERE id = ?
            RETURNING id, tracked_item_id, service_date, service_odometer, comment, photo_ref,
                      created_at
            "#,
        )
        .bind(patch.service_date)
        .bind(patch.service_odometer)
        .bind(&patch.comment)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_event()))
    }
}

#[async_trait]
impl TransactionalServiceHistory for SqliteServiceHistoryStore {
    async fn begin_service_transaction(&self) -> Result<Box<dyn ServiceRecordingTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteServiceTransaction::new(tx)))
    }
}

/// Insert one event row on a pool or an open transaction
pub(crate) async fn insert_event<'e, E>(executor: E, event: &ServiceEvent) -> Result<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO service_events (
            id, tracked_item_id, service_date, service_odometer, comment, photo_ref, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&event.id)
    .bind(&event.tracked_item_id)
    .bind(event.service_date)
    .bind(event.service_odometer)
    .bind(&event.comment)
    .bind(&event.photo_ref)
    .bind(event.created_at)
    .execute(executor)
    .await
    .map_err(map_sqlx_error)?;

    Ok(())
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceEventRow {
    id: String,
    tracked_item_id: String,
    service_date: NaiveDate,
    service_odometer: i64,
    comment: Option<String>,
    photo_ref: Option<String>,
    created_at: i64,
}

impl ServiceEventRow {
    fn into_event(self) -> ServiceEvent {
        ServiceEvent {
            id: self.id,
            tracked_item_id: self.tracked_item_id,
            service_date: self.service_date,
            service_odometer: self.service_odometer,
            comment: self.comment,
            photo_ref: self.photo_ref,
            created_at: self.created_at,
        }
    }
}
