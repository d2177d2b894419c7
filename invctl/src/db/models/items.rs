//! Database models for the authoritative item master.

use crate::types::ItemStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the item master. Authoritative for status and contract state;
/// the paired tag record is reconciled against this on every read.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Item {
    /// RFID tag identifier. Unique and immutable once assigned.
    pub tag_id: String,
    /// Free-text descriptive name; drives categorization.
    pub common_name: String,
    pub bin_location: Option<String>,
    pub status: String,
    pub last_contract_num: Option<String>,
    pub rental_class_num: Option<String>,
    pub date_last_scanned: Option<DateTime<Utc>>,
    pub last_scanned_by: Option<String>,
}

impl Item {
    pub fn parsed_status(&self) -> ItemStatus {
        ItemStatus::parse(&self.status)
    }

    pub fn is_on_contract(&self) -> bool {
        self.parsed_status().is_on_contract()
    }
}

/// Request to insert a new item master row (tag provisioning).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreateDBRequest {
    pub tag_id: String,
    pub common_name: String,
    pub bin_location: Option<String>,
    pub status: String,
    pub last_contract_num: Option<String>,
    pub rental_class_num: Option<String>,
    pub last_scanned_by: Option<String>,
}
