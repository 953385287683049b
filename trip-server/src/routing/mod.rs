//! Routing provider integration.
//!
//! The resolver asks a [`RouteProvider`] for driving routes between two
//! points. [`OsrmClient`] talks to an OSRM server over HTTP;
//! [`MockRouteProvider`] serves canned routes for tests and offline runs.
//!
//! Key characteristics of OSRM:
//! - Coordinates in URLs are `lon,lat`, not `lat,lon`
//! - Failures such as `NoRoute` come back as a JSON `code`, often with
//!   HTTP 400, so the body has to be parsed even on error statuses
//! - The first route is the provider's preference; the rest are alternatives

mod client;
mod convert;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{OsrmClient, OsrmConfig};
pub use convert::{convert_route, convert_route_response};
pub use error::RoutingError;
pub use mock::MockRouteProvider;
pub use provider::{RouteProvider, RouteRequest, Transport};
pub use types::{LineString, OsrmRoute, RouteResponse};
