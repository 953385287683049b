//! Itinerary types.
//!
//! An `Itinerary` is a completed multi-leg trip: every leg between
//! consecutive waypoints, in order, plus the cumulative totals.

use chrono::Duration;

use super::{DomainError, RouteLeg};

/// A complete trip across all active waypoints.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect (end label of one = start label of the next)
///
/// Built once by the resolver and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<RouteLeg>,
    total_time: Duration,
    total_distance_m: f64,
}

impl Itinerary {
    /// Constructs an itinerary from legs and their accumulated totals.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - Legs list is empty
    /// - Legs don't connect
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Duration;
    /// use trip_server::domain::{Itinerary, RouteAlternative, RouteGeometry, RouteLeg};
    ///
    /// let route = RouteAlternative::new(RouteGeometry::default(), Duration::minutes(8), 4800.0);
    /// let leg = RouteLeg::new("Home", "Office", route);
    ///
    /// let itinerary = Itinerary::new(vec![leg], Duration::minutes(8), 4800.0).unwrap();
    /// assert_eq!(itinerary.leg_count(), 1);
    /// ```
    pub fn new(
        legs: Vec<RouteLeg>,
        total_time: Duration,
        total_distance_m: f64,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }

        for (i, window) in legs.windows(2).enumerate() {
            if window[0].end_label != window[1].start_label {
                return Err(DomainError::LegsNotContiguous(i));
            }
        }

        Ok(Itinerary {
            legs,
            total_time,
            total_distance_m,
        })
    }

    /// Constructs an itinerary, summing the totals from the legs.
    pub fn from_legs(legs: Vec<RouteLeg>) -> Result<Self, DomainError> {
        let total_time = legs
            .iter()
            .fold(Duration::zero(), |acc, leg| acc + leg.travel_time());
        let total_distance_m = legs.iter().map(RouteLeg::distance_m).sum();
        Self::new(legs, total_time, total_distance_m)
    }

    /// The legs in travel order.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Total expected driving time.
    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Total length in metres.
    pub fn total_distance_m(&self) -> f64 {
        self.total_distance_m
    }

    /// Label of the first waypoint.
    pub fn origin_label(&self) -> &str {
        &self.legs[0].start_label
    }

    /// Label of the last waypoint.
    pub fn destination_label(&self) -> &str {
        &self.legs[self.legs.len() - 1].end_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteAlternative, RouteGeometry};

    fn leg(from: &str, to: &str, mins: i64, metres: f64) -> RouteLeg {
        RouteLeg::new(
            from,
            to,
            RouteAlternative::new(RouteGeometry::default(), Duration::minutes(mins), metres),
        )
    }

    #[test]
    fn empty_itinerary_rejected() {
        let err = Itinerary::new(vec![], Duration::zero(), 0.0).unwrap_err();
        assert!(matches!(err, DomainError::EmptyItinerary));
    }

    #[test]
    fn disconnected_legs_rejected() {
        let legs = vec![leg("A", "B", 5, 100.0), leg("C", "D", 5, 100.0)];
        let err = Itinerary::from_legs(legs).unwrap_err();
        assert!(matches!(err, DomainError::LegsNotContiguous(0)));
    }

    #[test]
    fn from_legs_sums_totals() {
        let legs = vec![
            leg("A", "B", 10, 5000.0),
            leg("B", "C", 15, 7500.0),
            leg("C", "A", 20, 9000.0),
        ];
        let itinerary = Itinerary::from_legs(legs).unwrap();

        assert_eq!(itinerary.leg_count(), 3);
        assert_eq!(itinerary.total_time(), Duration::minutes(45));
        assert_eq!(itinerary.total_distance_m(), 21_500.0);
        assert_eq!(itinerary.origin_label(), "A");
        assert_eq!(itinerary.destination_label(), "A");
    }
}
