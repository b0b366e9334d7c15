//! JSON shapes of the ArogyaShayak REST API and their mapping to engine types.
//!
//! The API is lenient: counters may be missing and optional objects may be
//! absent or `null`. Everything here defaults rather than failing so a partial
//! record still reaches the engine.

use serde::{Deserialize, Serialize};

use arogya_discovery::types::{
    Accommodation, Address, GeoPoint, HospitalSummary, ResultPage, TravelEstimate,
};

/// `address` object shared by hospitals and accommodations. Any part may be
/// missing or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressDto {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Address {
            street: dto.street.unwrap_or_default(),
            city: dto.city.unwrap_or_default(),
            state: dto.state.unwrap_or_default(),
            zip: dto.zip,
        }
    }
}

/// A location as either `{lat, lng}` or a GeoJSON point (`coordinates: [lng, lat]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocationDto {
    LatLng { lat: f64, lng: f64 },
    GeoJson { coordinates: [f64; 2] },
}

impl From<LocationDto> for GeoPoint {
    fn from(dto: LocationDto) -> Self {
        match dto {
            LocationDto::LatLng { lat, lng } => GeoPoint::new(lat, lng),
            LocationDto::GeoJson {
                coordinates: [lng, lat],
            } => GeoPoint::new(lat, lng),
        }
    }
}

/// One hospital record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<AddressDto>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub num_reviews: Option<u32>,
    #[serde(default)]
    pub is_ayushman_empanelled: bool,
    #[serde(default)]
    pub location: Option<LocationDto>,
}

impl From<HospitalDto> for HospitalSummary {
    fn from(dto: HospitalDto) -> Self {
        let mut hospital = HospitalSummary::new(dto.id, dto.name)
            .with_address(dto.address.map(Address::from).unwrap_or_default())
            .with_specialties(dto.specialties)
            .with_rating(dto.rating.unwrap_or(0.0), dto.num_reviews.unwrap_or(0))
            .with_ayushman(dto.is_ayushman_empanelled);
        if let Some(location) = dto.location {
            hospital = hospital.with_location(location.into());
        }
        hospital
    }
}

/// Response of `GET /api/hospitals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalListResponse {
    #[serde(default)]
    pub data: Vec<HospitalDto>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "totalPages")]
    pub pages: Option<u32>,
}

impl HospitalListResponse {
    /// Converts to a result page for the requested page number.
    ///
    /// Missing counters describe a single page holding everything returned.
    pub fn into_page(self, requested: u32) -> ResultPage {
        let items: Vec<HospitalSummary> =
            self.data.into_iter().map(HospitalSummary::from).collect();
        let page = self.page.unwrap_or(requested).max(1);
        let total_pages = match self.pages {
            Some(pages) => pages,
            None if items.is_empty() => 0,
            None => page,
        };
        ResultPage::new(items, page, total_pages).normalized()
    }
}

/// Body of `POST /api/chat/estimate-travel`.
#[derive(Debug, Clone, Serialize)]
pub struct TravelEstimateRequest<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

/// Response of `POST /api/chat/estimate-travel`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimateResponse {
    pub estimated_cost: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub modes: Vec<String>,
    #[serde(default)]
    pub tips: String,
}

impl From<TravelEstimateResponse> for TravelEstimate {
    fn from(dto: TravelEstimateResponse) -> Self {
        TravelEstimate::new(dto.estimated_cost, dto.estimated_time, dto.modes, dto.tips)
    }
}

/// One accommodation record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub address: Option<AddressDto>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl From<AccommodationDto> for Accommodation {
    fn from(dto: AccommodationDto) -> Self {
        let mut stay = Accommodation::new(dto.id, dto.name, dto.kind, dto.price_per_night);
        stay.address = dto.address.map(Address::from);
        stay.rating = dto.rating;
        stay.amenities = dto.amenities;
        stay
    }
}

/// Response of `GET /api/accommodations`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccommodationListResponse {
    #[serde(default)]
    pub data: Vec<AccommodationDto>,
}
