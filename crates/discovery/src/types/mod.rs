//! Core value types for discovery and trip planning.
//!
//! - [`SearchQuery`] - term + specialty + page, compared without the page
//! - [`ResultPage`] / [`AccumulatedResults`] - paginated catalog results
//! - [`HospitalSummary`] - one catalog entry
//! - [`TravelEstimate`], [`Accommodation`], [`CarePlan`] - care plan parts

mod hospital;
mod pagination;
mod plan;
mod search;

pub use hospital::{Address, GeoPoint, HospitalSummary};
pub use pagination::{AccumulatedResults, ResultPage};
pub use plan::{
    Accommodation, CarePlan, CostRange, Destination, TravelEstimate, select_cheapest,
    total_estimate,
};
pub use search::SearchQuery;
