//! Database repository for the item master.

use crate::db::{
    errors::Result,
    handlers::repository::Repository,
    models::items::{Item, ItemCreateDBRequest},
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Items<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Items<'c> {
    /// Create a new Items repository instance
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// List items whose paired tag record is classified as resale stock.
    ///
    /// Ordered by common name then tag id so the sub-grouping of the
    /// aggregate view is stable across requests.
    #[instrument(skip(self), err)]
    pub async fn list_resale(&mut self) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT i.*
            FROM item_master i
            JOIN tag_records t ON t.tag_id = i.tag_id
            WHERE LOWER(t.item_type) = 'resale'
            ORDER BY i.common_name ASC, i.tag_id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(items)
    }
}

#[async_trait::async_trait]
impl Repository for Items<'_> {
    type CreateRequest = ItemCreateDBRequest;
    type Response = Item;
    type Id = str;

    #[instrument(skip(self, request), fields(tag_id = %request.tag_id), err)]
    async fn create(&mut self, request: &ItemCreateDBRequest) -> Result<Item> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO item_master (
                tag_id, common_name, bin_location, status,
                last_contract_num, rental_class_num, date_last_scanned, last_scanned_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), $7)
            RETURNING *
            "#,
        )
        .bind(&request.tag_id)
        .bind(&request.common_name)
        .bind(&request.bin_location)
        .bind(&request.status)
        .bind(&request.last_contract_num)
        .bind(&request.rental_class_num)
        .bind(&request.last_scanned_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(item)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, tag_id: &str) -> Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM item_master WHERE tag_id = $1
            "#,
        )
        .bind(tag_id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(item)
    }

    #[instrument(skip(self), err)]
    async fn list(&mut self) -> Result<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT * FROM item_master ORDER BY common_name ASC, tag_id ASC
            "#,
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(items)
    }
}
