//! Travel estimation and accommodation collaborators.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CollaboratorResult;
use crate::types::{Accommodation, GeoPoint, TravelEstimate};

/// Estimates travel cost and duration between two places.
#[async_trait]
pub trait TravelEstimator: Send + Sync {
    /// Estimates travel from `origin` to `destination`, both free text.
    async fn estimate_travel(
        &self,
        origin: &str,
        destination: &str,
    ) -> CollaboratorResult<TravelEstimate>;
}

/// Finds accommodation near a point.
///
/// Distance computation is the finder's business; the engine only passes the radius.
#[async_trait]
pub trait AccommodationFinder: Send + Sync {
    /// Returns stays within `radius` distance units of `location`, in any order.
    async fn find_near(
        &self,
        location: GeoPoint,
        radius: f64,
    ) -> CollaboratorResult<Vec<Accommodation>>;
}

/// Shared travel estimator handle.
pub type DynTravelEstimator = Arc<dyn TravelEstimator>;

/// Shared accommodation finder handle.
pub type DynAccommodationFinder = Arc<dyn AccommodationFinder>;
