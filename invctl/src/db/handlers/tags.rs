//! Database repository for tag records.
//!
//! Every mutation here is row-scoped and keyed by tag identifier. The
//! reconciliation corrections additionally carry an expected-status guard so
//! a correction races cleanly against a concurrent lifecycle mutation of the
//! same tag: whoever commits first wins, the loser affects zero rows.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::tags::{TagCreateDBRequest, TagRecord},
};
use crate::types::TagStatus;
use sqlx::PgConnection;
use tracing::instrument;

pub struct Tags<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Tags<'c> {
    /// Create a new Tags repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List tag records classified as resale stock, ordered by tag id.
    #[instrument(skip(self), err)]
    pub async fn list_resale(&mut self) -> Result<Vec<TagRecord>> {
        let tags = sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT * FROM tag_records
            WHERE LOWER(item_type) = 'resale'
            ORDER BY tag_id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(tags)
    }

    /// Fetch a tag record and lock its row for the current transaction.
    #[instrument(skip(self), err)]
    pub async fn get_for_update(&mut self, tag_id: &str) -> Result<Option<TagRecord>> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT * FROM tag_records WHERE tag_id = $1 FOR UPDATE
            "#,
        )
        .bind(tag_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(tag)
    }

    /// The item is deployed in the field: mirror that onto the tag record
    /// and copy the item's contract number.
    ///
    /// Guarded by `expect_status`; returns `None` when another writer already
    /// moved the row.
    #[instrument(skip(self), err)]
    pub async fn mark_deployed(
        &mut self,
        tag_id: &str,
        expect_status: &str,
        contract_num: Option<&str>,
    ) -> Result<Option<TagRecord>> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            UPDATE tag_records
            SET status = $3, last_contract_num = $4, date_updated = NOW()
            WHERE tag_id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(tag_id)
        .bind(expect_status)
        .bind(TagStatus::OUT_USED)
        .bind(contract_num)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(tag)
    }

    /// The item has returned and is available again: reactivate the tag
    /// record and clear its contract number.
    ///
    /// Guarded by `expect_status`; returns `None` when another writer already
    /// moved the row.
    #[instrument(skip(self), err)]
    pub async fn mark_returned(&mut self, tag_id: &str, expect_status: &str) -> Result<Option<TagRecord>> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            UPDATE tag_records
            SET status = $3, last_contract_num = NULL, date_updated = NOW()
            WHERE tag_id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(tag_id)
        .bind(expect_status)
        .bind(TagStatus::ACTIVE)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(tag)
    }

    /// Terminal sale transition: stamp the sale, bump the reuse counter.
    ///
    /// Precondition checks belong to the caller; this only performs the
    /// single-row update and reports whether it took effect.
    #[instrument(skip(self), err)]
    pub async fn mark_sold(&mut self, tag_id: &str) -> Result<Option<TagRecord>> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            UPDATE tag_records
            SET status = $2, date_sold = NOW(), date_updated = NOW(),
                reuse_count = reuse_count + 1
            WHERE tag_id = $1
            RETURNING *
            "#,
        )
        .bind(tag_id)
        .bind(TagStatus::SOLD)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(tag)
    }
}

#[async_trait::async_trait]
impl Repository for Tags<'_> {
    type CreateRequest = TagCreateDBRequest;
    type Response = TagRecord;
    type Id = str;

    #[instrument(skip(self, request), fields(tag_id = %request.tag_id), err)]
    async fn create(&mut self, request: &TagCreateDBRequest) -> Result<TagRecord> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            INSERT INTO tag_records (tag_id, status, item_type, last_contract_num, date_updated)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING *
            "#,
        )
        .bind(&request.tag_id)
        .bind(&request.status)
        .bind(&request.item_type)
        .bind(&request.last_contract_num)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(tag)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, tag_id: &str) -> Result<Option<TagRecord>> {
        let tag = sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT * FROM tag_records WHERE tag_id = $1
            "#,
        )
        .bind(tag_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(tag)
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<TagRecord>> {
        let tags = sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT * FROM tag_records ORDER BY tag_id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(tags)
    }
}
