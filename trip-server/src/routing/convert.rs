//! Conversion from OSRM responses to domain types.

use chrono::Duration;

use crate::domain::{GeoPoint, RouteAlternative, RouteGeometry};

use super::error::RoutingError;
use super::types::{OsrmRoute, RouteResponse};

/// OSRM code for a request that could not be routed.
const NO_ROUTE: &str = "NoRoute";

/// Longest plausible single leg (30 days of driving).
const MAX_LEG_DURATION_SECS: f64 = 30.0 * 24.0 * 60.0 * 60.0;

/// Convert a parsed OSRM response into route alternatives.
///
/// Preserves the provider's order, which the resolver relies on for
/// tie-breaking.
pub fn convert_route_response(
    response: &RouteResponse,
    status: u16,
) -> Result<Vec<RouteAlternative>, RoutingError> {
    match response.code.as_str() {
        "Ok" => response.routes.iter().map(convert_route).collect(),
        NO_ROUTE => Err(RoutingError::NoRouteFound),
        code => Err(RoutingError::Api {
            status,
            message: match &response.message {
                Some(message) => format!("{code}: {message}"),
                None => code.to_string(),
            },
        }),
    }
}

/// Convert a single OSRM route.
pub fn convert_route(route: &OsrmRoute) -> Result<RouteAlternative, RoutingError> {
    let travel_time = leg_duration(route.duration)?;
    if !route.distance.is_finite() || route.distance < 0.0 {
        return Err(RoutingError::Json {
            message: format!("invalid route distance: {}", route.distance),
        });
    }

    let points = match &route.geometry {
        Some(line) => line
            .coordinates
            .iter()
            .map(|[lon, lat]| GeoPoint::new(*lat, *lon))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?,
        None => Vec::new(),
    };

    Ok(RouteAlternative::new(
        RouteGeometry::new(points),
        travel_time,
        route.distance,
    ))
}

/// Convert fractional seconds to a leg `Duration`, rounded to the millisecond.
///
/// Negative, non-finite and implausibly long durations are rejected.
pub(super) fn leg_duration(secs: f64) -> Result<Duration, RoutingError> {
    if !secs.is_finite() || !(0.0..=MAX_LEG_DURATION_SECS).contains(&secs) {
        return Err(RoutingError::Json {
            message: format!("invalid route duration: {secs}"),
        });
    }
    Ok(Duration::milliseconds((secs * 1000.0).round() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::types::LineString;

    fn osrm_route(duration: f64, distance: f64) -> OsrmRoute {
        OsrmRoute {
            duration,
            distance,
            geometry: Some(LineString {
                coordinates: vec![[30.72, 46.48], [30.74, 46.47]],
            }),
        }
    }

    fn response(code: &str, routes: Vec<OsrmRoute>) -> RouteResponse {
        RouteResponse {
            code: code.to_string(),
            message: None,
            routes,
        }
    }

    #[test]
    fn ok_response_keeps_order() {
        let resp = response("Ok", vec![osrm_route(600.0, 5000.0), osrm_route(480.0, 4800.0)]);
        let alts = convert_route_response(&resp, 200).unwrap();

        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].travel_time, Duration::seconds(600));
        assert_eq!(alts[1].travel_time, Duration::seconds(480));
        assert_eq!(alts[1].distance_m, 4800.0);
    }

    #[test]
    fn geometry_swaps_lon_lat() {
        let alt = convert_route(&osrm_route(1.0, 1.0)).unwrap();
        let first = alt.geometry.points()[0];
        assert_eq!(first, GeoPoint::new(46.48, 30.72).unwrap());
    }

    #[test]
    fn missing_geometry_is_empty() {
        let mut route = osrm_route(1.0, 1.0);
        route.geometry = None;
        assert!(convert_route(&route).unwrap().geometry.is_empty());
    }

    #[test]
    fn fractional_seconds_round_to_millis() {
        let alt = convert_route(&osrm_route(12.3456, 1.0)).unwrap();
        assert_eq!(alt.travel_time, Duration::milliseconds(12_346));
    }

    #[test]
    fn no_route_code() {
        let resp = response("NoRoute", vec![]);
        assert!(matches!(
            convert_route_response(&resp, 400),
            Err(RoutingError::NoRouteFound)
        ));
    }

    #[test]
    fn other_codes_are_api_errors() {
        let mut resp = response("InvalidQuery", vec![]);
        resp.message = Some("Query string malformed".into());
        match convert_route_response(&resp, 400) {
            Err(RoutingError::Api { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "InvalidQuery: Query string malformed");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn negative_duration_rejected() {
        assert!(convert_route(&osrm_route(-1.0, 10.0)).is_err());
        assert!(convert_route(&osrm_route(1.0, f64::NAN)).is_err());
    }

    #[test]
    fn absurd_duration_rejected() {
        assert!(matches!(
            convert_route(&osrm_route(1e17, 10.0)),
            Err(RoutingError::Json { .. })
        ));
        assert!(convert_route(&osrm_route(MAX_LEG_DURATION_SECS, 10.0)).is_ok());
        assert!(convert_route(&osrm_route(f64::INFINITY, 10.0)).is_err());
    }

    #[test]
    fn ok_with_no_routes_is_empty() {
        let resp = response("Ok", vec![]);
        assert!(convert_route_response(&resp, 200).unwrap().is_empty());
    }
}
