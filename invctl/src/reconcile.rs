//! Tag state reconciliation against the item master.
//!
//! The item master is the single authority; a tag record is a projection of
//! it and is allowed to drift. Reconciliation runs as a side effect of every
//! read path that touches both stores: each planned correction is written
//! back immediately, one row at a time, and a failure on one tag never blocks
//! the rest of the batch.
//!
//! Only two transitions are defined. Every other (item, tag) status
//! combination is deliberately left untouched.

use crate::db::handlers::Tags;
use crate::db::models::{items::Item, tags::TagRecord};
use crate::types::{ItemStatus, TagStatus};
use serde::Serialize;
use sqlx::PgConnection;
use std::collections::HashMap;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// A drift correction planned for one tag record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Item is rented out or delivered: tag goes out/used and picks up the
    /// item's contract number.
    Deploy,
    /// Item is back on the shelf: tag reactivates and drops its contract.
    Return,
}

/// Decide whether a tag record has drifted from its item.
///
/// Pure and total; `None` means the combination has no defined transition
/// and the tag passes through unchanged.
pub fn plan(item_status: &ItemStatus, tag_status: &TagStatus) -> Option<Correction> {
    match item_status {
        ItemStatus::OnRent | ItemStatus::Delivered if *tag_status != TagStatus::OutUsed => Some(Correction::Deploy),
        ItemStatus::ReadyToRent if *tag_status == TagStatus::OutUsed => Some(Correction::Return),
        _ => None,
    }
}

/// A correction that was persisted during a reconciliation pass.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppliedCorrection {
    pub tag_id: String,
    pub from_status: String,
    pub to_status: String,
    pub contract_num: Option<String>,
}

/// Reconcile a batch of tag records against the item master index.
///
/// Returns the records with corrections applied plus the list of persisted
/// corrections. Infallible by design: a write failure is logged and the
/// stale record is passed through, so the read path embedding this still
/// serves its best-known data. Each correction carries an expected-status
/// guard, making the pass idempotent and safe against concurrent writers.
pub async fn reconcile(
    db: &mut PgConnection,
    items_by_tag: &HashMap<&str, &Item>,
    tag_records: Vec<TagRecord>,
) -> (Vec<TagRecord>, Vec<AppliedCorrection>) {
    let mut reconciled = Vec::with_capacity(tag_records.len());
    let mut corrections = Vec::new();
    let mut repo = Tags::new(db);

    for tag in tag_records {
        let Some(item) = items_by_tag.get(tag.tag_id.as_str()) else {
            // Orphaned tag record; nothing authoritative to converge to.
            reconciled.push(tag);
            continue;
        };

        let Some(correction) = plan(&item.parsed_status(), &tag.parsed_status()) else {
            reconciled.push(tag);
            continue;
        };

        let outcome = match correction {
            Correction::Deploy => {
                repo.mark_deployed(&tag.tag_id, &tag.status, item.last_contract_num.as_deref())
                    .await
            }
            Correction::Return => repo.mark_returned(&tag.tag_id, &tag.status).await,
        };

        match outcome {
            Ok(Some(updated)) => {
                corrections.push(AppliedCorrection {
                    tag_id: updated.tag_id.clone(),
                    from_status: tag.status.clone(),
                    to_status: updated.status.clone(),
                    contract_num: updated.last_contract_num.clone(),
                });
                reconciled.push(updated);
            }
            Ok(None) => {
                // A concurrent writer moved the row first; its state wins.
                debug!(tag_id = %tag.tag_id, "Tag changed under reconciliation, correction skipped");
                reconciled.push(tag);
            }
            Err(err) => {
                warn!(tag_id = %tag.tag_id, error = %err, "Failed to persist tag correction");
                reconciled.push(tag);
            }
        }
    }

    (reconciled, corrections)
}
