//! Waypoint types.
//!
//! A waypoint is a named stop entered by the user. Its location starts out
//! unresolved and becomes resolved once geocoding picks a place for it.

use super::GeoPoint;

/// A geocoded place: a formatted address and its coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Formatted address (address lines joined by ", ")
    pub name: String,
    /// Resolved coordinate
    pub point: GeoPoint,
}

impl Place {
    /// Creates a new place.
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

/// Resolution state of a waypoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Location {
    /// Not geocoded yet, or invalidated by an edit
    #[default]
    Unresolved,
    /// Geocoded to a concrete place
    Resolved(Place),
}

impl Location {
    /// Returns true if the location has been resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Location::Resolved(_))
    }

    /// Returns the place if resolved.
    pub fn place(&self) -> Option<&Place> {
        match self {
            Location::Resolved(place) => Some(place),
            Location::Unresolved => None,
        }
    }
}

/// A named stop with an optional resolved location.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waypoint {
    /// Text the user entered for this stop
    pub label: String,
    /// Where the stop resolved to, if anywhere
    pub location: Location,
}

impl Waypoint {
    /// Creates an unresolved waypoint.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            location: Location::Unresolved,
        }
    }

    /// Returns a routable copy of this waypoint, or `None` if unresolved.
    pub fn resolved(&self) -> Option<ResolvedWaypoint> {
        self.location.place().map(|place| ResolvedWaypoint {
            label: self.label.clone(),
            place: place.clone(),
        })
    }
}

/// A waypoint whose location is known. Only these are ever routed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWaypoint {
    pub label: String,
    pub place: Place,
}

impl ResolvedWaypoint {
    /// Creates a resolved waypoint.
    pub fn new(label: impl Into<String>, place: Place) -> Self {
        Self {
            label: label.into(),
            place,
        }
    }

    /// The coordinate to route from or to.
    pub fn point(&self) -> GeoPoint {
        self.place.point
    }
}
