// SQLite Service Recording Transaction

use crate::error::map_sqlx_error;
use crate::service_history_store::insert_event;
use async_trait::async_trait;
use carmaint_core::domain::ServiceEvent;
use carmaint_core::error::{AppError, Result};
use carmaint_core::port::{ServiceRecordingTransaction, Transaction};
use chrono::NaiveDate;
use sqlx::{Sqlite, Transaction as SqlxTransaction};

/// Event append + checkpoint move on one SQLite transaction
///
/// Dropping it without commit rolls back.
pub struct SqliteServiceTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteServiceTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteServiceTransaction<'_> {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl ServiceRecordingTransaction for SqliteServiceTransaction<'_> {
    async fn append_event(&mut self, event: &ServiceEvent) -> Result<()> {
        insert_event(&mut *self.tx, event).await
    }

    async fn apply_checkpoint(
        &mut self,
        tracked_item_id: &str,
        odometer: i64,
        date: NaiveDate,
        updated_at: i64,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE tracked_items
            SET last_service_odometer = ?, last_service_date = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(odometer)
        .bind(date)
        .bind(updated_at)
        .bind(tracked_item_id)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "tracked item {} not found",
                tracked_item_id
            )));
        }
        Ok(())
    }
}
