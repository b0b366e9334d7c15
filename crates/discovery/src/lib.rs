//! ArogyaShayak Discovery Engine
//!
//! This crate provides the client-side orchestration behind hospital discovery and
//! trip planning: paginated hospital search, debounced type-ahead suggestions, and a
//! two-phase planner that turns a travel origin into a care plan with travel cost
//! and nearby stays.
//!
//! # Architecture
//!
//! - [`types`] - Value types: queries, result pages, hospitals, care plans
//! - [`error`] - Error types and the propagation policy
//! - [`core`] - Collaborator traits (catalog, travel estimator, accommodation finder, session)
//! - [`search`] - Page accumulation, suggestion session and the search controller
//! - [`planner`] - The trip planner state machine
//! - [`config`] - Engine configuration
//!
//! The engine never talks to the network itself. Remote services are reached through
//! the [`core`] traits, so every component can be driven by in-memory collaborators in
//! tests and by HTTP clients in production.
//!
//! # Ordering
//!
//! Remote calls may complete in any order. Components never cancel in-flight calls;
//! they tag each call with a token or session number and drop responses that are no
//! longer current when they arrive:
//!
//! - suggestions apply only the last issued lookup
//! - a search page is applied only if its session and query are still current
//! - a care plan is applied only if the planner was not reset or resubmitted
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use arogya_discovery::{DiscoveryConfig, SearchController};
//! # use arogya_discovery::core::HospitalCatalog;
//! # async fn run(catalog: Arc<dyn HospitalCatalog>) -> Result<(), arogya_discovery::DiscoveryError> {
//! let controller = SearchController::new(catalog, &DiscoveryConfig::default());
//!
//! controller.submit_search("apollo", Some("Cardiology")).await?;
//! while controller.results().has_more() {
//!     controller.load_next_page().await?;
//! }
//! println!("{} hospitals", controller.results().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod core;
pub mod error;
pub mod planner;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, DiscoveryConfig};
pub use error::{CollaboratorError, DiscoveryError, DiscoveryResult, ErrorKind, ValidationError};
pub use planner::{PlanOutcome, TripPlanPhase, TripPlanner};
pub use search::{LookupOutcome, SearchController, SearchOutcome, SuggestionSession};
pub use types::{AccumulatedResults, CarePlan, Destination, HospitalSummary, SearchQuery};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
