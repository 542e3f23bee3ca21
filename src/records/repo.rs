use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::repo_types::{NewRecord, Record, RecordId, RecordUpdate};
use crate::error::{RecordError, RecordResult};

/// Keyed collection of activity records.
///
/// Every method is a single atomic call against the backing store. Listing
/// returns records in insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, new: NewRecord) -> RecordResult<Record>;

    async fn list_by_owner(&self, owner_id: &str) -> RecordResult<Vec<Record>>;

    /// Replaces `date`, `steps` and `calories`. Never inserts on a miss.
    async fn update_by_id(&self, id: RecordId, changes: RecordUpdate) -> RecordResult<Record>;

    async fn delete_by_id(&self, id: RecordId) -> RecordResult<()>;

    /// Claims `marker` and, if it was unclaimed and `owner_id` has no records
    /// yet, inserts `records`. Returns whether anything was inserted.
    async fn seed_once(
        &self,
        marker: &str,
        owner_id: &str,
        records: Vec<NewRecord>,
    ) -> RecordResult<bool>;
}

#[derive(Clone)]
pub struct PgRecordStore {
    db: PgPool,
}

impl PgRecordStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn create(&self, new: NewRecord) -> RecordResult<Record> {
        let record = sqlx::query_as::<_, Record>(
            r#"
            INSERT INTO health_records (id, owner_id, date, steps, calories)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, date, steps, calories
            "#,
        )
        .bind(RecordId::new())
        .bind(&new.owner_id)
        .bind(&new.date)
        .bind(new.steps)
        .bind(new.calories)
        .fetch_one(&self.db)
        .await
        .context("insert health record")?;
        Ok(record)
    }

    async fn list_by_owner(&self, owner_id: &str) -> RecordResult<Vec<Record>> {
        let rows = sqlx::query_as::<_, Record>(
            r#"
            SELECT id, owner_id, date, steps, calories
              FROM health_records
             WHERE owner_id = $1
             ORDER BY seq ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await
        .context("list health records by owner")?;
        Ok(rows)
    }

    async fn update_by_id(&self, id: RecordId, changes: RecordUpdate) -> RecordResult<Record> {
        let row = sqlx::query_as::<_, Record>(
            r#"
            UPDATE health_records
               SET date = $2, steps = $3, calories = $4
             WHERE id = $1
            RETURNING id, owner_id, date, steps, calories
            "#,
        )
        .bind(id)
        .bind(&changes.date)
        .bind(changes.steps)
        .bind(changes.calories)
        .fetch_optional(&self.db)
        .await
        .context("update health record")?;
        row.ok_or(RecordError::NotFound)
    }

    async fn delete_by_id(&self, id: RecordId) -> RecordResult<()> {
        let done = sqlx::query("DELETE FROM health_records WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete health record")?;
        if done.rows_affected() == 0 {
            return Err(RecordError::NotFound);
        }
        Ok(())
    }

    async fn seed_once(
        &self,
        marker: &str,
        owner_id: &str,
        records: Vec<NewRecord>,
    ) -> RecordResult<bool> {
        let mut tx = self.db.begin().await.context("begin seed tx")?;

        // Concurrent claimers block on the primary key until the winner commits.
        let claimed = sqlx::query(
            r#"
            INSERT INTO seed_markers (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(marker)
        .execute(&mut *tx)
        .await
        .context("claim seed marker")?
        .rows_affected()
            == 1;

        if !claimed {
            debug!(marker, "seed marker already present");
            tx.rollback().await.context("rollback seed tx")?;
            return Ok(false);
        }

        let (existing,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM health_records WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&mut *tx)
                .await
                .context("count seeded records")?;

        let insert = existing == 0;
        if insert {
            for new in records {
                sqlx::query(
                    r#"
                    INSERT INTO health_records (id, owner_id, date, steps, calories)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(RecordId::new())
                .bind(&new.owner_id)
                .bind(&new.date)
                .bind(new.steps)
                .bind(new.calories)
                .execute(&mut *tx)
                .await
                .context("insert seed record")?;
            }
        } else {
            debug!(owner_id, existing, "owner already has records; marker claimed only");
        }

        tx.commit().await.context("commit seed tx")?;
        Ok(insert)
    }
}
