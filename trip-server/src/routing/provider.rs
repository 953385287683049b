//! Routing provider abstraction.

use std::fmt;
use std::future::Future;

use crate::domain::{GeoPoint, RouteAlternative};

use super::error::RoutingError;

/// Mode of transport for a routing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Transport {
    #[default]
    Automobile,
}

impl Transport {
    /// Profile name used in provider URLs.
    pub fn profile(&self) -> &'static str {
        match self {
            Transport::Automobile => "driving",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

/// A request for routes between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteRequest {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub transport: Transport,
    /// Ask the provider for alternative routes, not just its preferred one
    pub alternatives: bool,
}

impl RouteRequest {
    /// A driving request asking for alternatives, as used for every trip leg.
    pub fn driving(from: GeoPoint, to: GeoPoint) -> Self {
        Self {
            from,
            to,
            transport: Transport::Automobile,
            alternatives: true,
        }
    }
}

/// Trait for routing providers.
///
/// This abstraction allows the resolver to be tested with mock data.
pub trait RouteProvider: Send + Sync {
    /// Get candidate routes for a request.
    ///
    /// An empty list means the provider answered but offered nothing; the
    /// caller decides what that means.
    fn route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Vec<RouteAlternative>, RoutingError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driving_request_asks_for_alternatives() {
        let a = GeoPoint::new(46.0, 30.0).unwrap();
        let b = GeoPoint::new(46.1, 30.1).unwrap();
        let req = RouteRequest::driving(a, b);

        assert_eq!(req.transport, Transport::Automobile);
        assert!(req.alternatives);
        assert_eq!(req.transport.to_string(), "driving");
    }
}
