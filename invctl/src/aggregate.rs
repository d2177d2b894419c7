//! Aggregate views over categorized inventory.
//!
//! Groups items into a two-level hierarchy: category, then raw common name
//! within each category. Counts only; both levels are total functions over
//! any input sequence.

use crate::categorize::{categorize, Category};
use crate::db::models::items::Item;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Per-category roll-up.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategorySummary {
    pub category: Category,
    /// Number of items in the category.
    pub total_amount: i64,
    /// Items whose status puts them on a customer contract (On Rent, Delivered).
    pub on_contract: i64,
}

/// Per-(category, common name) roll-up.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommonNameCount {
    pub common_name: String,
    pub total: i64,
}

/// Group items by category and, within each category, by raw common name.
///
/// The category summary is sorted lexicographically by label. The per-category
/// sub-groups keep first-seen insertion order from the input sequence; that
/// order is the default display order downstream and must not be re-sorted.
pub fn aggregate(items: &[Item]) -> (Vec<CategorySummary>, HashMap<Category, Vec<CommonNameCount>>) {
    let mut totals: HashMap<Category, (i64, i64)> = HashMap::new();
    let mut subcategories: HashMap<Category, Vec<CommonNameCount>> = HashMap::new();

    for item in items {
        let category = categorize(&item.common_name);

        let entry = totals.entry(category).or_insert((0, 0));
        entry.0 += 1;
        if item.is_on_contract() {
            entry.1 += 1;
        }

        let names = subcategories.entry(category).or_default();
        match names.iter_mut().find(|count| count.common_name == item.common_name) {
            Some(count) => count.total += 1,
            None => names.push(CommonNameCount {
                common_name: item.common_name.clone(),
                total: 1,
            }),
        }
    }

    let mut summary: Vec<CategorySummary> = totals
        .into_iter()
        .map(|(category, (total_amount, on_contract))| CategorySummary {
            category,
            total_amount,
            on_contract,
        })
        .collect();
    summary.sort_by(|a, b| a.category.label().cmp(b.category.label()));

    (summary, subcategories)
}
