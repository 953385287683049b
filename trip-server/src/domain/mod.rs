//! Domain types for the trip planner.
//!
//! This module contains the core domain model types: coordinates,
//! waypoints, route legs and itineraries. All types enforce their
//! invariants at construction time, so code that receives these types
//! can trust their validity.

mod error;
mod geo_point;
mod itinerary;
mod leg;
mod waypoint;

pub use error::DomainError;
pub use geo_point::{GeoPoint, InvalidGeoPoint};
pub use itinerary::Itinerary;
pub use leg::{RouteAlternative, RouteGeometry, RouteLeg};
pub use waypoint::{Location, Place, ResolvedWaypoint, Waypoint};
