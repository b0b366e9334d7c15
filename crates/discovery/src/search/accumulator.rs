//! Page accumulation for a search session.
//!
//! Successive [`ResultPage`]s of one session are folded into a single
//! [`AccumulatedResults`] list. Items are de-duplicated by id (first occurrence
//! wins) so overlapping pages from the backend never produce repeats, and the
//! list keeps page-arrival order.
//!
//! # Example
//!
//! ```
//! use arogya_discovery::search::accumulator::merge;
//! use arogya_discovery::types::{AccumulatedResults, HospitalSummary, ResultPage, SearchQuery};
//!
//! let query = SearchQuery::new("apollo", None);
//! let first = ResultPage::new(vec![HospitalSummary::new("a", "Apollo Patna")], 1, 2);
//! let second = ResultPage::new(
//!     vec![
//!         HospitalSummary::new("a", "Apollo Patna"),
//!         HospitalSummary::new("b", "Apollo Gaya"),
//!     ],
//!     2,
//!     2,
//! );
//!
//! let acc = merge(AccumulatedResults::empty(query), first, true);
//! let acc = merge(acc, second, false);
//! assert_eq!(acc.ids(), vec!["a", "b"]);
//! assert_eq!(acc.current_page, 2);
//! ```

use std::collections::HashSet;

use crate::types::{AccumulatedResults, ResultPage};

/// Merges a page into the accumulated results.
///
/// With `is_new_session` the existing items are replaced by the page's items;
/// otherwise the page is appended, skipping ids already present. Page counters
/// always come from the incoming page. The query is kept from `existing`.
pub fn merge(
    existing: AccumulatedResults,
    page: ResultPage,
    is_new_session: bool,
) -> AccumulatedResults {
    let AccumulatedResults { query, items, .. } = existing;

    let mut items = if is_new_session { Vec::new() } else { items };
    let mut seen: HashSet<String> = items.iter().map(|item| item.id.clone()).collect();

    for item in page.items {
        if seen.insert(item.id.clone()) {
            items.push(item);
        }
    }

    AccumulatedResults {
        query,
        items,
        current_page: page.page,
        total_pages: page.total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HospitalSummary, SearchQuery};

    fn hospital(id: &str) -> HospitalSummary {
        HospitalSummary::new(id, format!("Hospital {}", id))
    }

    fn page(ids: &[&str], page: u32, total: u32) -> ResultPage {
        ResultPage::new(ids.iter().map(|id| hospital(id)).collect(), page, total)
    }

    fn start() -> AccumulatedResults {
        AccumulatedResults::empty(SearchQuery::new("x", None))
    }

    #[test]
    fn test_new_session_replaces_items() {
        let acc = merge(start(), page(&["a", "b"], 1, 2), true);
        let acc = merge(acc, page(&["c"], 1, 1), true);
        assert_eq!(acc.ids(), vec!["c"]);
        assert_eq!(acc.current_page, 1);
        assert_eq!(acc.total_pages, 1);
    }

    #[test]
    fn test_new_session_dedups_within_page() {
        let acc = merge(start(), page(&["a", "b", "a"], 1, 1), true);
        assert_eq!(acc.ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut first = page(&["a"], 1, 1);
        first.items.push(HospitalSummary::new("a", "Renamed"));
        let acc = merge(start(), first, true);
        assert_eq!(acc.items[0].name, "Hospital a");
    }

    #[test]
    fn test_append_skips_overlap() {
        let acc = merge(start(), page(&["a", "b"], 1, 3), true);
        let acc = merge(acc, page(&["b", "c"], 2, 3), false);
        assert_eq!(acc.ids(), vec!["a", "b", "c"]);
        assert_eq!(acc.current_page, 2);
        assert_eq!(acc.total_pages, 3);
    }

    #[test]
    fn test_merge_idempotent() {
        let base = merge(start(), page(&["a", "b"], 1, 3), true);
        let p2 = page(&["c", "d"], 2, 3);
        let once = merge(base, p2.clone(), false);
        let twice = merge(once.clone(), p2, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_query_preserved() {
        let acc = merge(start(), page(&["a"], 1, 1), true);
        assert_eq!(acc.query, SearchQuery::new("x", None));
    }

    #[test]
    fn test_empty_first_page() {
        let acc = merge(start(), ResultPage::empty(), true);
        assert!(acc.is_empty());
        assert_eq!(acc.current_page, 1);
        assert!(!acc.has_more());
    }
}
