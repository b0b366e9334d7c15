//! Debounced type-ahead suggestions with stale-response suppression.
//!
//! Every call to [`SuggestionSession::on_input`] issues a fresh token from a
//! monotonic counter and invalidates every earlier token. A lookup is fired only
//! after the input has been quiet for the debounce window, and its response is
//! applied only if its token is still the last issued one when it completes.
//! Earlier lookups that finish late are discarded, so suggestions never flicker
//! back to an older input.
//!
//! ```text
//! Idle --input--> Pending --response (current token)--> Applied
//!                    |
//!                    +--response (stale token)--> Discarded
//!                    +--newer input before window--> Debounced (never fired)
//! ```
//!
//! Lookup failures are logged and swallowed; they never reach the user.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::core::DynCatalog;
use crate::error::DiscoveryError;
use crate::types::HospitalSummary;

/// Visible type-ahead state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// The text currently in the search box.
    pub raw_input: String,

    /// Token of the most recent input; older tokens are stale.
    pub last_issued_token: u64,

    /// Suggestions from the last applied lookup.
    pub suggestions: Vec<HospitalSummary>,

    /// Whether the suggestion list is shown.
    pub visible: bool,

    /// Token of the lookup still awaiting a response, if it is the current one.
    pub pending_token: Option<u64>,
}

impl SuggestionState {
    /// Returns the session phase.
    pub fn phase(&self) -> SuggestionPhase {
        if self.raw_input.trim().is_empty() {
            SuggestionPhase::Idle
        } else if self.pending_token == Some(self.last_issued_token) {
            SuggestionPhase::Pending
        } else {
            SuggestionPhase::Settled
        }
    }
}

/// Phase of a suggestion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionPhase {
    /// Empty input, nothing shown.
    Idle,
    /// The latest input is waiting for its debounce window or its response.
    Pending,
    /// The latest input's lookup completed (applied or failed).
    Settled,
}

/// What happened to one call of [`SuggestionSession::on_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Input was empty; suggestions were cleared and hidden.
    Cleared,
    /// Newer input arrived within the debounce window; no lookup was fired.
    Debounced,
    /// The lookup completed but a newer input had been issued; results dropped.
    Discarded,
    /// Results were applied and shown. Carries the number of suggestions.
    Applied(usize),
    /// The lookup failed; visible state was left untouched.
    Failed,
}

/// Debounced, token-fenced type-ahead session over a hospital catalog.
pub struct SuggestionSession {
    catalog: DynCatalog,
    debounce: Duration,
    state: Mutex<SuggestionState>,
    latest: watch::Sender<u64>,
}

impl SuggestionSession {
    /// Creates a session with the given quiet window.
    pub fn new(catalog: DynCatalog, debounce: Duration) -> Self {
        let (latest, _) = watch::channel(0);
        Self {
            catalog,
            debounce,
            state: Mutex::new(SuggestionState::default()),
            latest,
        }
    }

    /// Returns the debounce window.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Handles a change of the search box text.
    ///
    /// Resolves once this input's lookup is settled: cleared, debounced away,
    /// applied, discarded as stale, or failed.
    pub async fn on_input(&self, raw_text: &str) -> LookupOutcome {
        let (token, mut newer_input) = {
            let mut state = self.state.lock();
            let token = self.issue_token(&mut state);
            state.raw_input = raw_text.to_string();

            if raw_text.trim().is_empty() {
                state.suggestions.clear();
                state.visible = false;
                state.pending_token = None;
                return LookupOutcome::Cleared;
            }

            state.pending_token = Some(token);
            (token, self.latest.subscribe())
        };

        if !self.debounce.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(self.debounce) => {}
                _ = newer_input.changed() => {
                    debug!(token, "suggestion lookup debounced");
                    return LookupOutcome::Debounced;
                }
            }
        }

        if !self.is_current(token) {
            debug!(token, "suggestion lookup debounced");
            return LookupOutcome::Debounced;
        }

        let query = raw_text.trim();
        let result = self.catalog.suggest(query).await;

        let mut state = self.state.lock();
        if state.last_issued_token != token {
            debug!(
                token,
                latest = state.last_issued_token,
                query,
                "discarding stale suggestions"
            );
            return LookupOutcome::Discarded;
        }
        state.pending_token = None;

        match result {
            Ok(suggestions) => {
                let count = suggestions.len();
                state.suggestions = suggestions;
                state.visible = true;
                LookupOutcome::Applied(count)
            }
            Err(source) => {
                let err = DiscoveryError::SuggestionFailed {
                    input: query.to_string(),
                    source,
                };
                warn!(error = %err, "suggestion lookup failed");
                LookupOutcome::Failed
            }
        }
    }

    /// Puts a picked suggestion's name in the search box and hides the list.
    ///
    /// Invalidates any lookup still in flight. Does not run a search; returns the
    /// new search box text for the caller to submit.
    pub fn pick_suggestion(&self, item: &HospitalSummary) -> String {
        let mut state = self.state.lock();
        self.issue_token(&mut state);
        state.raw_input = item.name.clone();
        state.visible = false;
        state.pending_token = None;
        state.raw_input.clone()
    }

    /// Hides the suggestion list and invalidates any lookup in flight, keeping
    /// the search box text.
    pub fn dismiss(&self) {
        let mut state = self.state.lock();
        self.issue_token(&mut state);
        state.visible = false;
        state.pending_token = None;
    }

    /// Returns a copy of the visible state.
    pub fn snapshot(&self) -> SuggestionState {
        self.state.lock().clone()
    }

    /// Returns the current search box text.
    pub fn input(&self) -> String {
        self.state.lock().raw_input.clone()
    }

    fn issue_token(&self, state: &mut SuggestionState) -> u64 {
        state.last_issued_token += 1;
        self.latest.send_replace(state.last_issued_token);
        state.last_issued_token
    }

    fn is_current(&self, token: u64) -> bool {
        self.state.lock().last_issued_token == token
    }
}
