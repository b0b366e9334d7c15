//! Search session controller.
//!
//! [`SearchController`] owns the current [`SearchQuery`] and its
//! [`AccumulatedResults`], and composes the page accumulator with a
//! [`SuggestionSession`] for type-ahead input.
//!
//! Every submitted search starts a new session. A response is applied only if
//! both its session number and its query still match the controller's; anything
//! else belongs to a superseded session and is dropped without error. At most one
//! page fetch is outstanding per session.

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::accumulator::merge;
use super::suggestions::{LookupOutcome, SuggestionSession, SuggestionState};
use crate::config::DiscoveryConfig;
use crate::core::DynCatalog;
use crate::error::{CollaboratorResult, DiscoveryError, DiscoveryResult, ErrorKind};
use crate::types::{AccumulatedResults, HospitalSummary, ResultPage, SearchQuery};

/// Result of a search or page load that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The page was merged into the results.
    Loaded {
        /// The merged page number.
        page: u32,
        /// Items the page added after de-duplication.
        added: usize,
    },
    /// A newer search started while this fetch was in flight; its response was dropped.
    Superseded,
    /// Every page of the session has been loaded; no fetch was issued.
    Exhausted,
    /// A page fetch for this session is already in flight; no fetch was issued.
    Busy,
}

#[derive(Debug, Default)]
struct SearchState {
    session: u64,
    results: AccumulatedResults,
    in_flight: Option<u32>,
    last_error: Option<ErrorKind>,
}

/// Drives hospital search sessions over a catalog.
pub struct SearchController {
    catalog: DynCatalog,
    suggestions: SuggestionSession,
    state: Mutex<SearchState>,
}

impl SearchController {
    /// Creates a controller using the config's debounce window for type-ahead.
    pub fn new(catalog: DynCatalog, config: &DiscoveryConfig) -> Self {
        let suggestions = SuggestionSession::new(catalog.clone(), config.debounce);
        Self {
            catalog,
            suggestions,
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Starts a new search session and fetches its first page.
    ///
    /// The previous results are cleared immediately. On success the first page
    /// replaces them; on failure the results stay empty and a
    /// [`DiscoveryError::FetchFailed`] is returned.
    pub async fn submit_search(
        &self,
        term: &str,
        specialty: Option<&str>,
    ) -> DiscoveryResult<SearchOutcome> {
        let query = SearchQuery::new(term, specialty.map(str::to_string));
        let session = {
            let mut state = self.state.lock();
            state.session += 1;
            state.results = AccumulatedResults::empty(query.clone());
            state.in_flight = Some(1);
            state.last_error = None;
            state.session
        };
        self.suggestions.dismiss();

        debug!(session, query = %query, "submitting search");
        let result = self
            .catalog
            .search(query.term(), query.specialty(), 1)
            .await;

        self.apply(session, &query, 1, result, true)
    }

    /// Fetches and appends the next page of the current session.
    ///
    /// Returns [`SearchOutcome::Exhausted`] without fetching when the last page
    /// has been merged, and [`SearchOutcome::Busy`] while another page fetch is
    /// outstanding. On failure the loaded pages are kept.
    pub async fn load_next_page(&self) -> DiscoveryResult<SearchOutcome> {
        let (session, query, page) = {
            let mut state = self.state.lock();
            if state.in_flight.is_some() {
                return Ok(SearchOutcome::Busy);
            }
            let Some(page) = state.results.next_page() else {
                return Ok(SearchOutcome::Exhausted);
            };
            state.in_flight = Some(page);
            (state.session, state.results.query.clone(), page)
        };

        debug!(session, query = %query, page, "loading next page");
        let result = self
            .catalog
            .search(query.term(), query.specialty(), page)
            .await;

        self.apply(session, &query, page, result, false)
    }

    fn apply(
        &self,
        session: u64,
        query: &SearchQuery,
        requested: u32,
        result: CollaboratorResult<ResultPage>,
        is_new_session: bool,
    ) -> DiscoveryResult<SearchOutcome> {
        let mut state = self.state.lock();
        if state.session != session || state.results.query != *query {
            debug!(
                session,
                current = state.session,
                page = requested,
                "discarding page from superseded search"
            );
            return Ok(SearchOutcome::Superseded);
        }
        state.in_flight = None;

        match result {
            Ok(mut page) => {
                if page.page != requested {
                    warn!(
                        requested,
                        returned = page.page,
                        "catalog returned a different page than requested"
                    );
                    page.page = requested;
                }
                if !page.is_consistent() {
                    warn!(
                        page = page.page,
                        total_pages = page.total_pages,
                        items = page.len(),
                        "repairing inconsistent page counters"
                    );
                }
                let page = page.normalized();
                let before = if is_new_session { 0 } else { state.results.len() };
                let results = std::mem::take(&mut state.results);
                state.results = merge(results, page, is_new_session);
                state.last_error = None;
                Ok(SearchOutcome::Loaded {
                    page: requested,
                    added: state.results.len() - before,
                })
            }
            Err(source) => {
                state.last_error = Some(ErrorKind::FetchFailed);
                Err(DiscoveryError::FetchFailed {
                    term: query.term().to_string(),
                    page: requested,
                    source,
                })
            }
        }
    }

    /// Forwards a change of the search box text to the suggestion session.
    pub async fn on_input(&self, raw_text: &str) -> LookupOutcome {
        self.suggestions.on_input(raw_text).await
    }

    /// Puts a picked suggestion in the search box. Does not search.
    pub fn pick_suggestion(&self, item: &HospitalSummary) -> String {
        self.suggestions.pick_suggestion(item)
    }

    /// Returns a copy of the accumulated results.
    pub fn results(&self) -> AccumulatedResults {
        self.state.lock().results.clone()
    }

    /// Returns the current session's query.
    pub fn query(&self) -> SearchQuery {
        self.state.lock().results.query.clone()
    }

    /// Returns the kind of the last failure in this session, if any.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.state.lock().last_error
    }

    /// Returns true while a page fetch of the current session is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }

    /// Returns a copy of the type-ahead state.
    pub fn suggestions(&self) -> SuggestionState {
        self.suggestions.snapshot()
    }

    /// Returns the search box text.
    pub fn input_term(&self) -> String {
        self.suggestions.input()
    }
}
