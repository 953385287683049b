//! Route and leg types.
//!
//! A `RouteAlternative` is one candidate route returned by a routing
//! provider. A `RouteLeg` is the alternative chosen for one consecutive
//! pair of waypoints.

use chrono::Duration;

use super::GeoPoint;

/// Polyline describing the path of a route.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteGeometry {
    points: Vec<GeoPoint>,
}

impl RouteGeometry {
    /// Creates a geometry from an ordered list of points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// The ordered points of the polyline.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Returns true if the provider supplied no geometry.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box as (south-west, north-east), or `None` if empty.
    ///
    /// Used by map front-ends to fit the viewport to a leg.
    pub fn bounds(&self) -> Option<(GeoPoint, GeoPoint)> {
        let first = self.points.first()?;
        let (mut min_lat, mut min_lon) = (first.lat(), first.lon());
        let (mut max_lat, mut max_lon) = (min_lat, min_lon);

        for p in &self.points[1..] {
            min_lat = min_lat.min(p.lat());
            min_lon = min_lon.min(p.lon());
            max_lat = max_lat.max(p.lat());
            max_lon = max_lon.max(p.lon());
        }

        // Both corners come from existing valid points.
        let sw = GeoPoint::new(min_lat, min_lon).ok()?;
        let ne = GeoPoint::new(max_lat, max_lon).ok()?;
        Some((sw, ne))
    }
}

/// One candidate route for a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAlternative {
    /// Path of the route
    pub geometry: RouteGeometry,
    /// Expected driving time
    pub travel_time: Duration,
    /// Length in metres
    pub distance_m: f64,
}

impl RouteAlternative {
    /// Creates a new alternative.
    pub fn new(geometry: RouteGeometry, travel_time: Duration, distance_m: f64) -> Self {
        Self {
            geometry,
            travel_time,
            distance_m,
        }
    }
}

/// The route chosen between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    /// Label of the waypoint the leg starts at
    pub start_label: String,
    /// Label of the waypoint the leg ends at
    pub end_label: String,
    /// The selected route
    pub route: RouteAlternative,
}

impl RouteLeg {
    /// Creates a new leg.
    pub fn new(
        start_label: impl Into<String>,
        end_label: impl Into<String>,
        route: RouteAlternative,
    ) -> Self {
        Self {
            start_label: start_label.into(),
            end_label: end_label.into(),
            route,
        }
    }

    /// Expected driving time of this leg.
    pub fn travel_time(&self) -> Duration {
        self.route.travel_time
    }

    /// Length of this leg in metres.
    pub fn distance_m(&self) -> f64 {
        self.route.distance_m
    }
}
