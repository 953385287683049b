//! Itinerary assembly for presentation.
//!
//! Pure transform from a resolved [`Itinerary`] into per-leg display
//! records and a summary line.

use chrono::Duration;

use crate::domain::{Itinerary, RouteAlternative};

/// Display record for one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegRecord {
    pub from_label: String,
    pub to_label: String,
    pub route: RouteAlternative,
}

/// Trip totals for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripSummary {
    /// Whole kilometres, rounded down
    pub distance_km: u64,
    pub total_time: Duration,
}

impl TripSummary {
    /// Summarize raw totals.
    pub fn from_totals(total_time: Duration, total_distance_m: f64) -> Self {
        Self {
            distance_km: (total_distance_m.max(0.0) / 1000.0).floor() as u64,
            total_time,
        }
    }

    /// One-line description of the trip totals.
    pub fn describe(&self) -> String {
        format!(
            "Total Distance: {} km Total Time: {}",
            self.distance_km,
            format_travel_time(self.total_time)
        )
    }
}

/// A trip ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct TripView {
    pub legs: Vec<LegRecord>,
    pub summary: TripSummary,
}

/// Build display records from an itinerary.
pub fn assemble(itinerary: &Itinerary) -> TripView {
    let legs = itinerary
        .legs()
        .iter()
        .map(|leg| LegRecord {
            from_label: leg.start_label.clone(),
            to_label: leg.end_label.clone(),
            route: leg.route.clone(),
        })
        .collect();

    TripView {
        legs,
        summary: TripSummary::from_totals(itinerary.total_time(), itinerary.total_distance_m()),
    }
}

/// Format a travel time as hours and minutes, e.g. `"1 h 05 min"`.
///
/// Seconds are rounded to the nearest minute.
pub fn format_travel_time(time: Duration) -> String {
    let total_mins = (time.num_seconds().max(0) + 30) / 60;
    let (hours, mins) = (total_mins / 60, total_mins % 60);

    if hours > 0 {
        format!("{hours} h {mins:02} min")
    } else {
        format!("{mins} min")
    }
}
