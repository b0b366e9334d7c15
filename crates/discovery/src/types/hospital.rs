//! Hospital catalog entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Postal address of a hospital or stay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    #[serde(default)]
    pub street: String,

    /// City.
    #[serde(default)]
    pub city: String,

    /// State.
    #[serde(default)]
    pub state: String,

    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl Address {
    /// Creates an address from street and city.
    pub fn new(street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            ..Default::default()
        }
    }

    /// Sets the state.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }
}

/// Formats as `"street, city"`, skipping empty parts.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.street.trim(), self.city.trim()) {
            ("", "") => Ok(()),
            (street, "") => write!(f, "{}", street),
            ("", city) => write!(f, "{}", city),
            (street, city) => write!(f, "{}, {}", street, city),
        }
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Creates a new point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// One hospital as listed by the catalog.
///
/// `id` is the de-duplication key for accumulated search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalSummary {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Postal address.
    #[serde(default)]
    pub address: Address,

    /// Specialties in catalog order, without repeats.
    #[serde(default)]
    pub specialties: Vec<String>,

    /// Average rating, never negative.
    #[serde(default)]
    pub rating: f64,

    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: u32,

    /// Whether the hospital is empanelled under Ayushman Bharat.
    #[serde(default)]
    pub ayushman_empanelled: bool,

    /// Location of the hospital, when the catalog knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl HospitalSummary {
    /// Creates a summary with an id and name and empty details.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: Address::default(),
            specialties: Vec::new(),
            rating: 0.0,
            review_count: 0,
            ayushman_empanelled: false,
            location: None,
        }
    }

    /// Sets the address.
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Sets the specialties, dropping repeats while keeping first-seen order.
    pub fn with_specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for specialty in specialties {
            let specialty = specialty.into();
            if !out.contains(&specialty) {
                out.push(specialty);
            }
        }
        self.specialties = out;
        self
    }

    /// Sets the rating and review count. Negative ratings clamp to zero.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = if rating.is_finite() { rating.max(0.0) } else { 0.0 };
        self.review_count = review_count;
        self
    }

    /// Marks the hospital as Ayushman Bharat empanelled.
    pub fn with_ayushman(mut self, empanelled: bool) -> Self {
        self.ayushman_empanelled = empanelled;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns true if the hospital lists the given specialty (case-insensitive).
    pub fn has_specialty(&self, specialty: &str) -> bool {
        self.specialties
            .iter()
            .any(|s| s.eq_ignore_ascii_case(specialty))
    }
}
