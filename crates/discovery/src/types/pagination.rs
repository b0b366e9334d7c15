//! Pagination types for hospital search results.
//!
//! The catalog answers with one [`ResultPage`] per request; the engine folds the
//! pages of one search session into [`AccumulatedResults`].

use serde::{Deserialize, Serialize};

use super::{HospitalSummary, SearchQuery};

/// One page of a paginated catalog query.
///
/// When `total_pages >= 1`, `1 <= page <= total_pages`. Only page 1 may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Items on this page in catalog order.
    pub items: Vec<HospitalSummary>,

    /// 1-based page number.
    pub page: u32,

    /// Total number of pages for the query.
    pub total_pages: u32,
}

impl ResultPage {
    /// Creates a page.
    pub fn new(items: Vec<HospitalSummary>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    /// Creates an empty first page (no matches).
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
        }
    }

    /// Returns true if the page satisfies the page-number invariants.
    pub fn is_consistent(&self) -> bool {
        if self.page == 0 {
            return false;
        }
        if self.total_pages >= 1 && self.page > self.total_pages {
            return false;
        }
        !(self.items.is_empty() && self.page != 1)
    }

    /// Repairs page counters reported by a lenient backend.
    ///
    /// A zero page becomes 1, and a page past the reported total raises the total
    /// to that page when the page carries items.
    pub fn normalized(mut self) -> Self {
        self.page = self.page.max(1);
        if !self.items.is_empty() && self.total_pages < self.page {
            self.total_pages = self.page;
        }
        self
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty()
    }
}

/// All pages of one search session merged into a single list.
///
/// Items are ordered by page arrival and never share an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulatedResults {
    /// The session's query (page-agnostic).
    pub query: SearchQuery,

    /// Merged items.
    pub items: Vec<HospitalSummary>,

    /// Last merged page, 0 before the first page arrives.
    pub current_page: u32,

    /// Total pages reported by the most recent page.
    pub total_pages: u32,
}

impl AccumulatedResults {
    /// Creates an empty accumulation for a query.
    pub fn empty(query: SearchQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            current_page: 0,
            total_pages: 0,
        }
    }

    /// Returns true if more pages can be loaded for this session.
    pub fn has_more(&self) -> bool {
        self.current_page >= 1 && self.current_page < self.total_pages
    }

    /// Returns the page to request next, or `None` when exhausted.
    pub fn next_page(&self) -> Option<u32> {
        self.has_more().then(|| self.current_page + 1)
    }

    /// Returns true if no items have been merged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of merged items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the item ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

impl Default for AccumulatedResults {
    fn default() -> Self {
        Self::empty(SearchQuery::default())
    }
}
