//! Guarded lifecycle mutations for tag records.
//!
//! The sale transition is terminal and must be atomic against concurrent
//! reconciliation of the same tag, so the whole check-then-update runs in one
//! transaction with the row locked.

use crate::db::handlers::Tags;
use crate::db::models::tags::TagRecord;
use crate::errors::{Error, Result};
use crate::types::ITEM_TYPE_RESALE;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Outcome of a successful sale.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoldConfirmation {
    pub tag_id: String,
    /// Reuse counter after the sale; tracks how many times the physical tag
    /// has been repurposed across items.
    pub reuse_count: i32,
    pub date_sold: Option<DateTime<Utc>>,
}

/// Only resale-classified tags may be sold.
pub fn check_sellable(tag: &TagRecord) -> Result<()> {
    if !tag.item_type.eq_ignore_ascii_case(ITEM_TYPE_RESALE) {
        return Err(Error::InvalidState {
            message: format!("tag {} is not a resale item", tag.tag_id),
        });
    }
    Ok(())
}

/// Mark a tag's item as sold.
///
/// Preconditions, checked in order with the row locked: the tag must exist
/// (`NotFound`), it must be resale stock (`InvalidState`), and the update
/// must take effect on exactly one row (`PersistenceFailure`). Any failure
/// rolls the transaction back, leaving the record unmodified.
#[instrument(skip(pool))]
pub async fn mark_item_sold(pool: &PgPool, tag_id: &str) -> Result<SoldConfirmation> {
    let tag_id = tag_id.trim();
    if tag_id.is_empty() {
        return Err(Error::MalformedInput {
            message: "tag id must not be empty".to_string(),
        });
    }

    let mut tx = pool.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut tags = Tags::new(&mut tx);

    let Some(tag) = tags.get_for_update(tag_id).await? else {
        return Err(Error::NotFound {
            resource: "Tag",
            id: tag_id.to_string(),
        });
    };
    check_sellable(&tag)?;

    let Some(updated) = tags.mark_sold(tag_id).await? else {
        // The locked row disappeared between the read and the write.
        return Err(Error::PersistenceFailure {
            operation: "mark tag sold",
        });
    };

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    info!(tag_id = %updated.tag_id, reuse_count = updated.reuse_count, "Tag marked sold");

    Ok(SoldConfirmation {
        tag_id: updated.tag_id,
        reuse_count: updated.reuse_count,
        date_sold: updated.date_sold,
    })
}
