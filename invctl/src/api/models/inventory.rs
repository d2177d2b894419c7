//! API types for the resale inventory views.

use crate::aggregate::{CategorySummary, CommonNameCount};
use crate::categorize::{categorize, Category};
use crate::db::models::items::Item;
use crate::filters::ItemFilter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the summary view.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SummaryQuery {
    /// Bypass the summary cache and recompute
    pub refresh: Option<bool>,
}

/// Query parameters for the paginated item listing.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ItemListQuery {
    /// Case-insensitive substring filter on the common name
    pub common_name: Option<String>,
    /// Case-insensitive substring filter on the tag identifier
    pub tag_id: Option<String>,
    /// Case-insensitive substring filter on the last contract number
    pub last_contract_num: Option<String>,
    /// Comma-separated rental class numbers; exact membership test
    pub rental_class_num: Option<String>,
    /// Page number. Lenient: non-numeric values fall back to page 1.
    pub page: Option<String>,
}

impl ItemListQuery {
    pub fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(1)
    }

    pub fn filter(&self) -> ItemFilter {
        fn populated(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|raw| !raw.is_empty())
                .map(str::to_string)
        }

        ItemFilter {
            common_name: populated(&self.common_name),
            tag_id: populated(&self.tag_id),
            last_contract_num: populated(&self.last_contract_num),
            rental_class_nums: populated(&self.rental_class_num),
        }
    }
}

/// Aggregate view of resale inventory.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResaleSummaryResponse {
    /// Per-category roll-up, sorted by label
    pub categories: Vec<CategorySummary>,
    /// Per-category common-name roll-ups, keyed by category label. Entries
    /// within a category keep first-seen order.
    pub subcategories: BTreeMap<String, Vec<CommonNameCount>>,
    /// Drift corrections persisted while serving this read
    pub corrections_applied: usize,
    pub generated_at: DateTime<Utc>,
}

impl ResaleSummaryResponse {
    pub fn new(
        categories: Vec<CategorySummary>,
        subcategories: HashMap<Category, Vec<CommonNameCount>>,
        corrections_applied: usize,
    ) -> Self {
        let subcategories = subcategories
            .into_iter()
            .map(|(category, names)| (category.label().to_string(), names))
            .collect();
        Self {
            categories,
            subcategories,
            corrections_applied,
            generated_at: Utc::now(),
        }
    }
}

/// One item row in the listing, with its derived category.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    pub tag_id: String,
    pub common_name: String,
    pub category: Category,
    pub bin_location: Option<String>,
    pub status: String,
    pub last_contract_num: Option<String>,
    pub rental_class_num: Option<String>,
    pub date_last_scanned: Option<DateTime<Utc>>,
    pub last_scanned_by: Option<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        let category = categorize(&item.common_name);
        Self {
            tag_id: item.tag_id,
            common_name: item.common_name,
            category,
            bin_location: item.bin_location,
            status: item.status,
            last_contract_num: item.last_contract_num,
            rental_class_num: item.rental_class_num,
            date_last_scanned: item.date_last_scanned,
            last_scanned_by: item.last_scanned_by,
        }
    }
}

/// Paginated item listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    /// The page actually served, after clamping
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Success body for the lifecycle mutation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SoldResponse {
    pub message: String,
}
