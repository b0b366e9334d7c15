//! Type-ahead suggestion integration tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio_test::{assert_pending, assert_ready, task};

use arogya_discovery::search::{LookupOutcome, SuggestionPhase, SuggestionSession};
use arogya_discovery::{DiscoveryConfig, SearchController};

use common::{ScriptedCatalog, hospital};

fn session(catalog: &Arc<ScriptedCatalog>, debounce: Duration) -> SuggestionSession {
    SuggestionSession::new(catalog.clone(), debounce)
}

// ============================================================================
// Staleness Tests
// ============================================================================

/// Lookups for "a", "ab" and "abc" resolve out of order; only "abc" is shown.
#[tokio::test]
async fn test_only_last_lookup_applies() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let release_a = catalog.gated_suggestion("a", vec![hospital("a1"), hospital("a2")]);
    let release_ab = catalog.gated_suggestion("ab", vec![hospital("ab1")]);
    let release_abc = catalog.gated_suggestion("abc", vec![hospital("abc1")]);
    let session = session(&catalog, Duration::ZERO);

    let mut a = task::spawn(session.on_input("a"));
    assert_pending!(a.poll());
    let mut ab = task::spawn(session.on_input("ab"));
    assert_pending!(ab.poll());
    let mut abc = task::spawn(session.on_input("abc"));
    assert_pending!(abc.poll());
    assert_eq!(session.snapshot().phase(), SuggestionPhase::Pending);

    release_abc.send(()).unwrap();
    assert_eq!(assert_ready!(abc.poll()), LookupOutcome::Applied(1));

    release_ab.send(()).unwrap();
    assert_eq!(assert_ready!(ab.poll()), LookupOutcome::Discarded);
    release_a.send(()).unwrap();
    assert_eq!(assert_ready!(a.poll()), LookupOutcome::Discarded);

    let state = session.snapshot();
    assert!(state.visible);
    assert_eq!(state.suggestions.len(), 1);
    assert_eq!(state.suggestions[0].id, "abc1");
    assert_eq!(state.phase(), SuggestionPhase::Settled);
}

/// Clearing the input cancels the effect of a lookup already in flight.
#[tokio::test]
async fn test_clear_invalidates_in_flight_lookup() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let release = catalog.gated_suggestion("apo", vec![hospital("h1")]);
    let session = session(&catalog, Duration::ZERO);

    let mut lookup = task::spawn(session.on_input("apo"));
    assert_pending!(lookup.poll());

    assert_eq!(session.on_input("").await, LookupOutcome::Cleared);
    release.send(()).unwrap();
    assert_eq!(assert_ready!(lookup.poll()), LookupOutcome::Discarded);

    let state = session.snapshot();
    assert!(!state.visible);
    assert!(state.suggestions.is_empty());
    assert_eq!(state.phase(), SuggestionPhase::Idle);
}

/// Picking a suggestion while a lookup is in flight keeps the list hidden.
#[tokio::test]
async fn test_pick_invalidates_in_flight_lookup() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let release = catalog.gated_suggestion("aiims", vec![hospital("h1")]);
    let session = session(&catalog, Duration::ZERO);

    let mut lookup = task::spawn(session.on_input("aiims"));
    assert_pending!(lookup.poll());

    session.pick_suggestion(&hospital("h9"));
    release.send(()).unwrap();
    assert_eq!(assert_ready!(lookup.poll()), LookupOutcome::Discarded);

    let state = session.snapshot();
    assert!(!state.visible);
    assert_eq!(state.raw_input, "Hospital h9");
}

// ============================================================================
// Debounce Tests
// ============================================================================

/// Keystrokes inside the quiet window coalesce into one lookup for the last text.
#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_keystrokes() {
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.suggestion("abc", vec![hospital("abc1")]);
    let session = session(&catalog, Duration::from_millis(300));

    let (a, ab, abc) = tokio::join!(session.on_input("a"), async {
        tokio::time::sleep(Duration::from_millis(120)).await;
        session.on_input("ab").await
    }, async {
        tokio::time::sleep(Duration::from_millis(240)).await;
        session.on_input("abc").await
    });

    assert_eq!(a, LookupOutcome::Debounced);
    assert_eq!(ab, LookupOutcome::Debounced);
    assert_eq!(abc, LookupOutcome::Applied(1));
    assert_eq!(catalog.suggestions.calls(), vec!["abc"]);
}

/// Keystrokes further apart than the window each fire a lookup.
#[tokio::test(start_paused = true)]
async fn test_slow_typing_fires_each_lookup() {
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.suggestion("a", vec![hospital("a1")]);
    catalog.suggestion("ab", vec![hospital("ab1")]);
    let session = session(&catalog, Duration::from_millis(300));

    assert_eq!(session.on_input("a").await, LookupOutcome::Applied(1));
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(session.on_input("ab").await, LookupOutcome::Applied(1));
    assert_eq!(catalog.suggestions.calls(), vec!["a", "ab"]);
}

/// Clearing the input before the window elapses means no lookup is ever sent.
#[tokio::test(start_paused = true)]
async fn test_clear_before_window_sends_nothing() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let session = session(&catalog, Duration::from_millis(300));

    let (typed, cleared) = tokio::join!(session.on_input("ap"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.on_input("").await
    });

    assert_eq!(typed, LookupOutcome::Debounced);
    assert_eq!(cleared, LookupOutcome::Cleared);
    assert_eq!(catalog.suggestions.call_count(), 0);
}

// ============================================================================
// Failure Tests
// ============================================================================

/// A failed lookup leaves the previous suggestions and visibility in place.
#[tokio::test]
async fn test_failure_is_swallowed() {
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.suggestion("apo", vec![hospital("h1")]);
    catalog.failing_suggestion("apol");
    let session = session(&catalog, Duration::ZERO);

    session.on_input("apo").await;
    assert_eq!(session.on_input("apol").await, LookupOutcome::Failed);

    let state = session.snapshot();
    assert!(state.visible);
    assert_eq!(state.suggestions[0].id, "h1");
    assert_eq!(state.raw_input, "apol");
}

// ============================================================================
// Controller Integration
// ============================================================================

#[tokio::test]
async fn test_controller_forwards_input_and_hides_on_submit() {
    let catalog = Arc::new(ScriptedCatalog::new());
    catalog.suggestion("aii", vec![hospital("aiims")]);
    catalog.page("aii", 1, common::page_of(&["aiims"], 1, 1));
    let controller = SearchController::new(catalog.clone(), &DiscoveryConfig::for_testing());

    assert_eq!(controller.on_input("aii").await, LookupOutcome::Applied(1));
    assert!(controller.suggestions().visible);

    controller.submit_search("aii", None).await.unwrap();
    assert!(!controller.suggestions().visible);
    assert_eq!(controller.input_term(), "aii");
}
