//! Test data builders.

use arogya_discovery::types::{
    Accommodation, Address, Destination, GeoPoint, HospitalSummary, ResultPage, TravelEstimate,
};

/// A hospital with a name derived from its id.
pub fn hospital(id: &str) -> HospitalSummary {
    HospitalSummary::new(id, format!("Hospital {}", id))
        .with_address(Address::new("Bailey Road", "Patna"))
}

/// A page of hospitals with the given ids.
pub fn page_of(ids: &[&str], page: u32, total_pages: u32) -> ResultPage {
    ResultPage::new(ids.iter().map(|id| hospital(id)).collect(), page, total_pages)
}

/// A stay with the given nightly price.
pub fn stay(id: &str, price: f64) -> Accommodation {
    Accommodation::new(id, format!("Stay {}", id), "Dharamshala", price)
}

/// A travel estimate reporting `cost`.
pub fn estimate(cost: &str) -> TravelEstimate {
    TravelEstimate::new(
        cost,
        "8 hours",
        vec!["Train".to_string(), "Bus".to_string()],
        "Carry medical records",
    )
}

/// AIIMS New Delhi with a location.
pub fn aiims() -> Destination {
    Destination::new("AIIMS", "Ansari Nagar, New Delhi").with_location(aiims_location())
}

/// Location of [`aiims`].
pub fn aiims_location() -> GeoPoint {
    GeoPoint::new(28.5672, 77.2100)
}
