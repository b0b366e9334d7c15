//! Travel estimation and nearby stays.

use std::sync::Arc;

use async_trait::async_trait;

use arogya_discovery::core::{AccommodationFinder, TravelEstimator};
use arogya_discovery::error::CollaboratorResult;
use arogya_discovery::types::{Accommodation, GeoPoint, TravelEstimate};

use crate::client::ApiClient;
use crate::wire::{AccommodationListResponse, TravelEstimateRequest, TravelEstimateResponse};

/// [`TravelEstimator`] over `POST /api/chat/estimate-travel`.
#[derive(Clone)]
pub struct HttpTravelEstimator {
    client: Arc<ApiClient>,
}

impl HttpTravelEstimator {
    const SERVICE: &'static str = "travel-estimator";
    const PATH: &'static str = "api/chat/estimate-travel";

    /// Creates an estimator over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TravelEstimator for HttpTravelEstimator {
    async fn estimate_travel(
        &self,
        origin: &str,
        destination: &str,
    ) -> CollaboratorResult<TravelEstimate> {
        let body = TravelEstimateRequest {
            origin,
            destination,
        };
        let response: TravelEstimateResponse = self
            .client
            .post_json(Self::SERVICE, Self::PATH, &body)
            .await?;
        Ok(response.into())
    }
}

/// [`AccommodationFinder`] over `GET /api/accommodations?lat=&lng=&distance=`.
#[derive(Clone)]
pub struct HttpAccommodationFinder {
    client: Arc<ApiClient>,
}

impl HttpAccommodationFinder {
    const SERVICE: &'static str = "accommodation-finder";
    const PATH: &'static str = "api/accommodations";

    /// Creates a finder over a shared client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccommodationFinder for HttpAccommodationFinder {
    async fn find_near(
        &self,
        location: GeoPoint,
        radius: f64,
    ) -> CollaboratorResult<Vec<Accommodation>> {
        let query = [
            ("lat", location.lat.to_string()),
            ("lng", location.lng.to_string()),
            ("distance", radius.to_string()),
        ];
        let response: AccommodationListResponse = self
            .client
            .get_json(Self::SERVICE, Self::PATH, &query)
            .await?;
        Ok(response.data.into_iter().map(Accommodation::from).collect())
    }
}
