//! OSRM HTTP API response types.
//!
//! These mirror the JSON structure returned by the OSRM `route` service.
//! Only the fields the planner needs are modelled.

use serde::Deserialize;

/// Top-level response of `GET /route/v1/{profile}/{coordinates}`.
///
/// OSRM reports failures in-band: `code` is `"Ok"` on success and names
/// the failure otherwise (`"NoRoute"`, `"InvalidQuery"`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub code: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route in the response. The first is OSRM's preferred route; the
/// rest are alternatives.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Expected travel time in seconds
    pub duration: f64,

    /// Distance in metres
    pub distance: f64,

    /// Present when requested with `geometries=geojson`
    #[serde(default)]
    pub geometry: Option<LineString>,
}

/// GeoJSON LineString. Coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineString {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                {
                    "geometry": {"type": "LineString", "coordinates": [[30.72, 46.48], [30.74, 46.47]]},
                    "legs": [],
                    "weight_name": "routability",
                    "weight": 700.1,
                    "duration": 612.3,
                    "distance": 4810.5
                }
            ],
            "waypoints": []
        }"#;

        let resp: RouteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code, "Ok");
        assert_eq!(resp.routes.len(), 1);
        assert_eq!(resp.routes[0].duration, 612.3);
        assert_eq!(resp.routes[0].distance, 4810.5);
        assert_eq!(resp.routes[0].geometry.as_ref().unwrap().coordinates.len(), 2);
    }

    #[test]
    fn parse_error_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let resp: RouteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.code, "NoRoute");
        assert!(resp.routes.is_empty());
        assert_eq!(resp.message.as_deref(), Some("Impossible route between points"));
    }
}
