//! Care plan types: travel estimates, nearby stays and the composed plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Address, GeoPoint};

/// A travel cost range in rupees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

impl CostRange {
    /// Separator between the bounds in the textual form.
    pub const SEPARATOR: char = '-';

    /// Parses a `"low-high"` range such as `"500-800"` or `" 500 - 800 "`.
    ///
    /// Returns `None` for any other shape: a single number, another separator,
    /// currency symbols, digit grouping, negative or non-finite values, or a
    /// high bound below the low bound.
    pub fn parse(text: &str) -> Option<Self> {
        let (low, high) = text.split_once(Self::SEPARATOR)?;
        let low = parse_amount(low)?;
        let high = parse_amount(high)?;
        (low <= high).then_some(Self { low, high })
    }

    /// Parses only the amount before the separator, as the trip total uses it.
    ///
    /// `"800-500"` and `"500-800 INR"` still yield 500 and 800; text without a
    /// separator or with a non-numeric left part yields `None`.
    pub fn parse_low(text: &str) -> Option<f64> {
        let (low, _) = text.split_once(Self::SEPARATOR)?;
        parse_amount(low)
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The travel estimator's answer for an origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    /// Cost as reported, e.g. `"500-800"`.
    pub estimated_cost: String,

    /// Parsed cost range; `None` when the reported cost is not a `"low-high"` pair.
    pub cost_range: Option<CostRange>,

    /// Travel duration as reported, e.g. `"6 hours"`.
    pub duration: String,

    /// Suggested transport modes in order of preference.
    pub transport_modes: Vec<String>,

    /// Free-text travel advice.
    pub advisory: String,
}

impl TravelEstimate {
    /// Builds an estimate from the reported cost text, parsing the range.
    pub fn new(
        estimated_cost: impl Into<String>,
        duration: impl Into<String>,
        transport_modes: Vec<String>,
        advisory: impl Into<String>,
    ) -> Self {
        let estimated_cost = estimated_cost.into();
        let cost_range = CostRange::parse(&estimated_cost);
        Self {
            estimated_cost,
            cost_range,
            duration: duration.into(),
            transport_modes,
            advisory: advisory.into(),
        }
    }

    /// Returns the amount before the `-` in the reported cost, or 0 when there is
    /// none. Does not require the high bound to parse.
    pub fn low_bound(&self) -> f64 {
        CostRange::parse_low(&self.estimated_cost).unwrap_or(0.0)
    }
}

/// A place to stay near a hospital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    /// Listing identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Listing type, e.g. `"Dharamshala"` or `"Hotel"`.
    pub kind: String,

    /// Nightly price in rupees.
    pub price_per_night: f64,

    /// Postal address, when listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Average rating, when listed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Listed amenities.
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Accommodation {
    /// Creates a listing with the required fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        price_per_night: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            price_per_night,
            address: None,
            rating: None,
            amenities: Vec::new(),
        }
    }

    /// Returns the cost of staying the given number of nights.
    pub fn stay_cost(&self, nights: u32) -> f64 {
        self.price_per_night * f64::from(nights)
    }

    fn has_usable_price(&self) -> bool {
        self.price_per_night.is_finite() && self.price_per_night >= 0.0
    }
}

/// The hospital a care plan travels to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Hospital name.
    pub name: String,

    /// Hospital address as displayed.
    pub address: String,

    /// Hospital location; without it no stays are looked up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Destination {
    /// Creates a destination without a location.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            location: None,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    /// Returns the destination text sent to the travel estimator: `"<name>, <address>"`.
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.address)
    }
}

/// A generated care plan: how to get to the hospital, where to stay, and a lower-bound
/// trip cost that excludes treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarePlan {
    /// Plan identifier.
    pub id: Uuid,

    /// When the plan was composed.
    pub created_at: DateTime<Utc>,

    /// Where the patient travels from.
    pub origin: String,

    /// The hospital.
    pub destination: Destination,

    /// Travel estimate; always present.
    pub travel_estimate: TravelEstimate,

    /// Cheapest nearby stays, ascending by nightly price.
    pub nearby_stays: Vec<Accommodation>,

    /// Nights the total budgets for.
    pub stay_nights: u32,

    /// `travel low bound + stay_nights × cheapest nightly price` (0 without stays).
    pub total_estimate: f64,
}

impl CarePlan {
    /// Composes a plan from the travel estimate and the raw stay listings.
    ///
    /// Listings without a usable price are dropped, the rest are sorted ascending by
    /// nightly price (ties keep listing order) and truncated to `max_stays`.
    pub fn compose(
        origin: impl Into<String>,
        destination: Destination,
        travel_estimate: TravelEstimate,
        stays: Vec<Accommodation>,
        stay_nights: u32,
        max_stays: usize,
    ) -> Self {
        let nearby_stays = select_cheapest(stays, max_stays);
        let total_estimate = total_estimate(&travel_estimate, &nearby_stays, stay_nights);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            origin: origin.into(),
            destination,
            travel_estimate,
            nearby_stays,
            stay_nights,
            total_estimate,
        }
    }

    /// Returns the cheapest stay, if any.
    pub fn cheapest_stay(&self) -> Option<&Accommodation> {
        self.nearby_stays.first()
    }

    /// Returns true if the plan was composed without any stays.
    pub fn is_degraded(&self) -> bool {
        self.nearby_stays.is_empty()
    }
}

/// Sorts listings ascending by nightly price and keeps the first `max`.
pub fn select_cheapest(stays: Vec<Accommodation>, max: usize) -> Vec<Accommodation> {
    let mut stays: Vec<Accommodation> = stays
        .into_iter()
        .filter(Accommodation::has_usable_price)
        .collect();
    stays.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
    stays.truncate(max);
    stays
}

/// Lower-bound trip cost: travel low bound plus `nights` at the cheapest stay.
pub fn total_estimate(estimate: &TravelEstimate, stays: &[Accommodation], nights: u32) -> f64 {
    let cheapest = stays
        .iter()
        .map(|s| s.price_per_night)
        .min_by(f64::total_cmp)
        .unwrap_or(0.0);
    estimate.low_bound() + f64::from(nights) * cheapest
}
