//! ArogyaShayak REST Collaborators
//!
//! HTTP implementations of the discovery engine's collaborator traits against the
//! ArogyaShayak API:
//!
//! | Trait | Endpoint |
//! |-------|----------|
//! | [`HospitalCatalog`](arogya_discovery::core::HospitalCatalog) | `GET /api/hospitals?name=&specialty=&page=&limit=` |
//! | [`TravelEstimator`](arogya_discovery::core::TravelEstimator) | `POST /api/chat/estimate-travel` |
//! | [`AccommodationFinder`](arogya_discovery::core::AccommodationFinder) | `GET /api/accommodations?lat=&lng=&distance=` |
//!
//! All three share one [`ApiClient`], which carries the timeout, user agent and
//! the signed-in user's bearer token.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use arogya_discovery::{DiscoveryConfig, SearchController};
//! use arogya_http::{ApiClient, HttpCatalog, HttpConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ApiClient::anonymous(&HttpConfig::default())?);
//! let catalog = Arc::new(HttpCatalog::new(client));
//! let controller = SearchController::new(catalog, &DiscoveryConfig::default());
//! controller.submit_search("AIIMS", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod travel;
pub mod wire;

pub use catalog::HttpCatalog;
pub use client::{ApiClient, ClientError};
pub use config::HttpConfig;
pub use travel::{HttpAccommodationFinder, HttpTravelEstimator};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
