//! Collaborator traits.
//!
//! The engine talks to the outside world only through these traits:
//!
//! - [`HospitalCatalog`] - paginated hospital search and type-ahead suggestions
//! - [`TravelEstimator`] - travel cost/duration between two free-text places
//! - [`AccommodationFinder`] - stays within a radius of a point
//! - [`SessionContext`] - read-only view of the signed-in user
//!
//! Every remote call is a suspension point; implementations must be `Send + Sync`
//! so components can hold them behind an `Arc` and issue overlapping calls.
//!
//! # Example: a fixed catalog
//!
//! ```
//! use async_trait::async_trait;
//! use arogya_discovery::core::HospitalCatalog;
//! use arogya_discovery::error::CollaboratorResult;
//! use arogya_discovery::types::{HospitalSummary, ResultPage};
//!
//! struct SingleHospital;
//!
//! #[async_trait]
//! impl HospitalCatalog for SingleHospital {
//!     async fn search(
//!         &self,
//!         _term: &str,
//!         _specialty: Option<&str>,
//!         _page: u32,
//!     ) -> CollaboratorResult<ResultPage> {
//!         Ok(ResultPage::new(vec![HospitalSummary::new("h1", "AIIMS Patna")], 1, 1))
//!     }
//!
//!     async fn suggest(&self, _query: &str) -> CollaboratorResult<Vec<HospitalSummary>> {
//!         Ok(vec![HospitalSummary::new("h1", "AIIMS Patna")])
//!     }
//! }
//! ```

pub mod catalog;
pub mod session;
pub mod travel;

pub use catalog::{DynCatalog, HospitalCatalog};
pub use session::{AnonymousSession, DynSession, SessionContext, StaticSession, UserIdentity};
pub use travel::{AccommodationFinder, DynAccommodationFinder, DynTravelEstimator, TravelEstimator};
