//! Hospital search: page accumulation, type-ahead suggestions and the session
//! controller that ties them together.

pub mod accumulator;
mod controller;
mod suggestions;

pub use controller::{SearchController, SearchOutcome};
pub use suggestions::{LookupOutcome, SuggestionPhase, SuggestionSession, SuggestionState};
