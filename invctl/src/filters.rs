//! Filtering and pagination over fetched item rows.
//!
//! Filters are optional, AND-combined predicates applied in memory: the data
//! set is re-fetched and re-filtered on every request, so no cursor stability
//! is needed. Pagination is a contiguous window over the filtered sequence.

use crate::db::models::items::Item;

/// Composable filter over item rows. Every populated field must match.
#[derive(Debug, Default, Clone)]
pub struct ItemFilter {
    /// Case-insensitive substring match on the common name.
    pub common_name: Option<String>,
    /// Case-insensitive substring match on the tag identifier.
    pub tag_id: Option<String>,
    /// Case-insensitive substring match on the last contract number.
    pub last_contract_num: Option<String>,
    /// Comma-separated list of rental class numbers; exact membership test.
    pub rental_class_nums: Option<String>,
}

impl ItemFilter {
    pub fn is_empty(&self) -> bool {
        self.common_name.is_none()
            && self.tag_id.is_none()
            && self.last_contract_num.is_none()
            && self.rental_class_nums.is_none()
    }

    /// Parse the rental class list: trim each element, drop empties.
    fn rental_classes(&self) -> Vec<String> {
        self.rental_class_nums
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|class| !class.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = &self.common_name {
            if !contains_ignore_case(&item.common_name, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.tag_id {
            if !contains_ignore_case(&item.tag_id, needle) {
                return false;
            }
        }
        if let Some(needle) = &self.last_contract_num {
            let matched = item
                .last_contract_num
                .as_deref()
                .is_some_and(|contract| contains_ignore_case(contract, needle));
            if !matched {
                return false;
            }
        }
        let classes = self.rental_classes();
        if !classes.is_empty() {
            let matched = item
                .rental_class_num
                .as_deref()
                .map(str::trim)
                .is_some_and(|class| classes.iter().any(|wanted| wanted == class));
            if !matched {
                return false;
            }
        }
        true
    }

    /// Narrow an owned row set to the rows matching every populated predicate.
    pub fn apply(&self, mut items: Vec<Item>) -> Vec<Item> {
        if self.is_empty() {
            return items;
        }
        items.retain(|item| self.matches(item));
        items
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// One page of a filtered result set plus the metadata the caller needs to
/// render pager controls.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice a contiguous window out of `items`.
///
/// `total_pages` is ceiling division; the requested page is clamped to
/// `[1, total_pages]` (page 1 with an empty slice when there are no items).
/// Never returns more than `page_size` items.
pub fn paginate<T>(items: Vec<T>, requested_page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = requested_page.clamp(1, total_pages.max(1));

    let start = (page - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(tag_id: &str, common_name: &str, contract: Option<&str>, class: Option<&str>) -> Item {
        Item {
            tag_id: tag_id.to_string(),
            common_name: common_name.to_string(),
            bin_location: None,
            status: "Ready to Rent".to_string(),
            last_contract_num: contract.map(str::to_string),
            rental_class_num: class.map(str::to_string),
            date_last_scanned: None,
            last_scanned_by: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = ItemFilter::default();
        let items = vec![item("A1", "FOG FLUID", None, None), item("B2", "POPCORN KIT", None, None)];
        assert_eq!(filter.apply(items).len(), 2);
    }

    #[test]
    fn substring_matches_are_case_insensitive() {
        let filter = ItemFilter {
            common_name: Some("fog".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&item("A1", "FOG FLUID QUART", None, None)));
        assert!(!filter.matches(&item("B2", "POPCORN KIT", None, None)));

        let filter = ItemFilter {
            tag_id: Some("e200".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&item("E20034120099", "FOG FLUID", None, None)));
    }

    #[test]
    fn missing_contract_never_matches_a_contract_filter() {
        let filter = ItemFilter {
            last_contract_num: Some("c12".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&item("A1", "FOG FLUID", Some("C123"), None)));
        assert!(!filter.matches(&item("B2", "FOG FLUID", None, None)));
    }

    #[test]
    fn rental_class_list_is_trimmed_and_exact() {
        let filter = ItemFilter {
            rental_class_nums: Some(" 100 , ,200,".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&item("A1", "FOG FLUID", None, Some("100"))));
        assert!(filter.matches(&item("B2", "FOG FLUID", None, Some("200"))));
        // Exact membership, not substring: 1001 is not 100.
        assert!(!filter.matches(&item("C3", "FOG FLUID", None, Some("1001"))));
        assert!(!filter.matches(&item("D4", "FOG FLUID", None, None)));
    }

    #[test]
    fn filters_compose_as_an_intersection() {
        let filter = ItemFilter {
            common_name: Some("fog".to_string()),
            rental_class_nums: Some("100".to_string()),
            ..Default::default()
        };
        let items = vec![
            item("A1", "FOG FLUID", None, Some("100")),
            item("B2", "FOG FLUID", None, Some("200")),
            item("C3", "POPCORN KIT", None, Some("100")),
        ];
        let kept = filter.apply(items);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].tag_id, "A1");
    }

    #[test]
    fn pagination_boundaries() {
        let rows: Vec<u32> = (0..45).collect();

        let page = paginate(rows.clone(), 1, 20);
        assert_eq!(page.total_items, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 20);

        let page = paginate(rows.clone(), 3, 20);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.page, 3);

        // Out-of-range requests clamp instead of erroring.
        let page = paginate(rows.clone(), 0, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 20);

        let page = paginate(rows, 99, 20);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn empty_set_serves_page_one_empty() {
        let page = paginate(Vec::<u32>::new(), 7, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_window_is_contiguous() {
        let rows: Vec<u32> = (0..45).collect();
        let page = paginate(rows, 2, 20);
        assert_eq!(page.items, (20..40).collect::<Vec<u32>>());
    }
}
