//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{GeoPoint, Place};
use crate::planner::{LegRecord, TripSummary, TripView, format_travel_time};

/// Query for an address lookup.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    /// Free-form address text
    pub q: String,

    /// Maximum number of candidates to return
    pub limit: Option<usize>,
}

/// Query for a reverse lookup.
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lon: f64,
}

/// A place in lookup results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceResult {
    /// Formatted address
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl PlaceResult {
    /// Convert from a domain place.
    pub fn from_place(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            lat: place.point.lat(),
            lon: place.point.lon(),
        }
    }
}

/// Response for an address lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub places: Vec<PlaceResult>,
}

/// One stop in a plan request.
///
/// A stop is either already located, or given as address text to geocode.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StopInput {
    Point {
        label: String,
        lat: f64,
        lon: f64,
    },
    Address {
        /// Shown in the itinerary; defaults to the address text
        #[serde(default)]
        label: Option<String>,
        address: String,
    },
}

impl StopInput {
    /// Label for the waypoint slot.
    pub fn label(&self) -> &str {
        match self {
            StopInput::Point { label, .. } => label,
            StopInput::Address {
                label: Some(label), ..
            } if !label.trim().is_empty() => label,
            StopInput::Address { address, .. } => address,
        }
    }
}

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Source first, then destinations. `null` leaves a slot empty.
    pub stops: Vec<Option<StopInput>>,

    /// Override the server's return policy for this request
    #[serde(default)]
    pub round_trip: Option<bool>,
}

/// One leg in a planned trip.
#[derive(Debug, Serialize, Deserialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,

    /// Travel time in seconds
    pub travel_time_s: i64,

    /// Travel time for display (e.g. "1 h 05 min")
    pub travel_time: String,

    pub distance_m: f64,

    /// Route polyline as `[lat, lon]` pairs
    pub geometry: Vec<[f64; 2]>,
}

impl LegResult {
    /// Convert from a leg record.
    pub fn from_record(record: &LegRecord) -> Self {
        Self {
            from: record.from_label.clone(),
            to: record.to_label.clone(),
            travel_time_s: record.route.travel_time.num_seconds(),
            travel_time: format_travel_time(record.route.travel_time),
            distance_m: record.route.distance_m,
            geometry: record
                .route
                .geometry
                .points()
                .iter()
                .map(|p: &GeoPoint| [p.lat(), p.lon()])
                .collect(),
        }
    }
}

/// Trip totals.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResult {
    pub distance_km: u64,
    pub total_time_s: i64,
    pub total_time: String,

    /// One-line summary, e.g. "Total Distance: 42 km Total Time: 1 h 05 min"
    pub description: String,
}

impl SummaryResult {
    /// Convert from a trip summary.
    pub fn from_summary(summary: &TripSummary) -> Self {
        Self {
            distance_km: summary.distance_km,
            total_time_s: summary.total_time.num_seconds(),
            total_time: format_travel_time(summary.total_time),
            description: summary.describe(),
        }
    }
}

/// Response for a trip plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanTripResponse {
    pub legs: Vec<LegResult>,
    pub summary: SummaryResult,
}

impl PlanTripResponse {
    /// Convert from an assembled trip.
    pub fn from_trip(trip: &TripView) -> Self {
        Self {
            legs: trip.legs.iter().map(LegResult::from_record).collect(),
            summary: SummaryResult::from_summary(&trip.summary),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
