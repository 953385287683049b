//! Mock routing provider for testing without a routing server.
//!
//! Serves canned alternatives for known point pairs. Fixtures can be built
//! in code or loaded from a JSON file for offline development.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use serde::Deserialize;

use crate::domain::{GeoPoint, RouteAlternative, RouteGeometry};

use super::convert::leg_duration;
use super::error::RoutingError;
use super::provider::{RouteProvider, RouteRequest};

/// Canned answer for one (from, to) pair.
#[derive(Debug, Clone)]
enum Canned {
    Routes(Vec<RouteAlternative>),
    NoRoute,
}

#[derive(Debug, Clone)]
struct Fixture {
    answer: Canned,
    delay: Option<std::time::Duration>,
}

/// One entry of a JSON fixture file.
#[derive(Debug, Deserialize)]
struct FixtureEntry {
    /// `[lat, lon]`
    from: [f64; 2],
    /// `[lat, lon]`
    to: [f64; 2],
    #[serde(default)]
    alternatives: Vec<FixtureAlternative>,
    #[serde(default)]
    no_route: bool,
}

#[derive(Debug, Deserialize)]
struct FixtureAlternative {
    duration_s: i64,
    distance_m: f64,
}

/// Mock routing provider.
///
/// Unknown pairs answer `NoRouteFound`. Every request is recorded so tests
/// can check which legs were asked for and in which order.
#[derive(Debug, Default)]
pub struct MockRouteProvider {
    fixtures: HashMap<(GeoPoint, GeoPoint), Fixture>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl MockRouteProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests from `from` to `to` with these alternatives.
    pub fn with_routes(
        mut self,
        from: GeoPoint,
        to: GeoPoint,
        alternatives: Vec<RouteAlternative>,
    ) -> Self {
        self.fixtures.insert(
            (from, to),
            Fixture {
                answer: Canned::Routes(alternatives),
                delay: None,
            },
        );
        self
    }

    /// Answer requests from `from` to `to` with `NoRouteFound`.
    pub fn with_no_route(mut self, from: GeoPoint, to: GeoPoint) -> Self {
        self.fixtures.insert(
            (from, to),
            Fixture {
                answer: Canned::NoRoute,
                delay: None,
            },
        );
        self
    }

    /// Delay the answer for an already-registered pair.
    pub fn with_delay(mut self, from: GeoPoint, to: GeoPoint, delay: std::time::Duration) -> Self {
        if let Some(fixture) = self.fixtures.get_mut(&(from, to)) {
            fixture.delay = Some(delay);
        }
        self
    }

    /// Load fixtures from a JSON file.
    ///
    /// The file holds an array of `{ "from": [lat, lon], "to": [lat, lon],
    /// "alternatives": [{ "duration_s": .., "distance_m": .. }] }` entries;
    /// `"no_route": true` marks a pair as unroutable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RoutingError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| RoutingError::Api {
            status: 0,
            message: format!("Failed to read {path:?}: {e}"),
        })?;

        let entries: Vec<FixtureEntry> =
            serde_json::from_str(&json).map_err(|e| RoutingError::Json {
                message: format!("Failed to parse {path:?}: {e}"),
            })?;

        let mut provider = Self::new();
        for entry in entries {
            let from = fixture_point(entry.from)?;
            let to = fixture_point(entry.to)?;

            provider = if entry.no_route {
                provider.with_no_route(from, to)
            } else {
                let alternatives = entry
                    .alternatives
                    .iter()
                    .map(|a| -> Result<RouteAlternative, RoutingError> {
                        Ok(RouteAlternative::new(
                            RouteGeometry::new(vec![from, to]),
                            leg_duration(a.duration_s as f64)?,
                            a.distance_m,
                        ))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                provider.with_routes(from, to, alternatives)
            };
        }

        Ok(provider)
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RouteRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

fn fixture_point([lat, lon]: [f64; 2]) -> Result<GeoPoint, RoutingError> {
    GeoPoint::new(lat, lon).map_err(|e| RoutingError::Json {
        message: e.to_string(),
    })
}

impl RouteProvider for MockRouteProvider {
    async fn route(&self, request: &RouteRequest) -> Result<Vec<RouteAlternative>, RoutingError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(*request);
        }

        let Some(fixture) = self.fixtures.get(&(request.from, request.to)).cloned() else {
            return Err(RoutingError::NoRouteFound);
        };

        if let Some(delay) = fixture.delay {
            tokio::time::sleep(delay).await;
        }

        match fixture.answer {
            Canned::Routes(alternatives) => Ok(alternatives),
            Canned::NoRoute => Err(RoutingError::NoRouteFound),
        }
    }
}
