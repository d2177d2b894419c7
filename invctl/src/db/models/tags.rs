//! Database models for the secondary tag record store.

use crate::types::TagStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the tag record store. A projection of item state that is
/// allowed to drift and is corrected by reconciliation on read.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TagRecord {
    /// Join key to the item master. Unique and immutable once assigned.
    pub tag_id: String,
    pub status: String,
    /// Classification gating the resale lifecycle: "resale" or another type.
    pub item_type: String,
    pub last_contract_num: Option<String>,
    /// How many times this physical tag has been repurposed across items.
    pub reuse_count: i32,
    pub date_sold: Option<DateTime<Utc>>,
    pub date_updated: Option<DateTime<Utc>>,
}

impl TagRecord {
    pub fn parsed_status(&self) -> TagStatus {
        TagStatus::parse(&self.status)
    }
}

/// Request to insert a new tag record (tag provisioning).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreateDBRequest {
    pub tag_id: String,
    pub status: String,
    pub item_type: String,
    pub last_contract_num: Option<String>,
}
