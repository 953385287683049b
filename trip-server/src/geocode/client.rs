//! Nominatim geocoding client.
//!
//! Converts address text to places, and coordinates back to addresses,
//! using the OpenStreetMap Nominatim API. Requests are spaced out to honour
//! the public instance's one-request-per-second usage policy.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::domain::{GeoPoint, Place};

use super::address::format_address;
use super::error::GeocodeError;
use super::geocoder::Geocoder;

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim rejects requests without an identifying user agent.
const DEFAULT_USER_AGENT: &str = concat!("trip-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of candidates per address lookup
    pub max_results: u8,
    /// Minimum spacing between requests
    pub min_interval: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl NominatimConfig {
    /// Create a config pointing at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the maximum number of candidates per lookup.
    pub fn with_max_results(mut self, n: u8) -> Self {
        self.max_results = n;
        self
    }

    /// Set the minimum spacing between requests (zero disables spacing).
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            max_results: 5,
            min_interval: Duration::from_millis(1100),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A single Nominatim result (`format=jsonv2`).
///
/// Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: String,
}

impl NominatimPlace {
    /// Convert to a domain place.
    pub fn to_place(&self) -> Result<Place, GeocodeError> {
        let parse = |s: &str| {
            s.parse::<f64>().map_err(|e| GeocodeError::Json {
                message: format!("invalid coordinate {s:?}: {e}"),
            })
        };
        let point = GeoPoint::new(parse(&self.lat)?, parse(&self.lon)?).map_err(|e| {
            GeocodeError::Json {
                message: e.to_string(),
            }
        })?;
        Ok(Place::new(format_address(self.display_name.split(',')), point))
    }
}

/// Reverse lookups answer either a place or `{"error": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(NominatimPlace),
    Error { error: String },
}

/// Nominatim client with request spacing.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    config: NominatimConfig,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            config: NominatimConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Wait until the minimum interval since the previous request has passed.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.config.min_interval {
                let wait = self.config.min_interval - elapsed;
                debug!(?wait, "Spacing geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Send a GET request and return the body of a successful response.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, GeocodeError> {
        self.pace().await;

        let url = format!("{}/{}", self.config.base_url, path);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Vec<Place>, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::AddressNotFound(String::new()));
        }

        let body = self
            .get(
                "search",
                &[
                    ("q", address.to_string()),
                    ("format", "jsonv2".to_string()),
                    ("limit", self.config.max_results.to_string()),
                ],
            )
            .await?;

        let results: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        let places = results
            .iter()
            .map(NominatimPlace::to_place)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(candidates = places.len(), "Nominatim search response");

        if places.is_empty() {
            return Err(GeocodeError::AddressNotFound(address.to_string()));
        }
        Ok(places)
    }

    #[instrument(skip(self), fields(point = %point))]
    async fn reverse(&self, point: GeoPoint) -> Result<Place, GeocodeError> {
        let body = self
            .get(
                "reverse",
                &[
                    ("lat", format!("{:.6}", point.lat())),
                    ("lon", format!("{:.6}", point.lon())),
                    ("format", "jsonv2".to_string()),
                ],
            )
            .await?;

        let response: ReverseResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        match response {
            ReverseResponse::Found(found) => {
                let place = found.to_place()?;
                if place.name.is_empty() {
                    return Err(GeocodeError::NoPlacemarkResolved);
                }
                Ok(place)
            }
            ReverseResponse::Error { error } => {
                debug!(%error, "Nominatim reverse lookup found nothing");
                Err(GeocodeError::NoPlacemarkResolved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.min_interval, Duration::from_millis(1100));
        assert!(config.user_agent.starts_with("trip-server/"));
    }

    #[test]
    fn config_builder() {
        let config = NominatimConfig::new("http://localhost:8088")
            .with_timeout(3)
            .with_max_results(2)
            .with_min_interval(Duration::ZERO);

        assert_eq!(config.base_url, "http://localhost:8088");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.max_results, 2);
        assert_eq!(config.min_interval, Duration::ZERO);
    }

    #[test]
    fn parse_search_results() {
        let json = r#"[
            {"place_id": 1, "lat": "46.4693", "lon": "30.7412",
             "display_name": "Kanatna Street,Prymorskyi District, Odesa, Ukraine"}
        ]"#;
        let results: Vec<NominatimPlace> = serde_json::from_str(json).unwrap();
        let place = results[0].to_place().unwrap();

        assert_eq!(place.name, "Kanatna Street, Prymorskyi District, Odesa, Ukraine");
        assert_eq!(place.point, GeoPoint::new(46.4693, 30.7412).unwrap());
    }

    #[test]
    fn bad_coordinate_is_json_error() {
        let place = NominatimPlace {
            lat: "north".into(),
            lon: "30.0".into(),
            display_name: "x".into(),
        };
        assert!(matches!(place.to_place(), Err(GeocodeError::Json { .. })));
    }

    #[test]
    fn parse_reverse_error() {
        let resp: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(matches!(resp, ReverseResponse::Error { .. }));
    }

    #[test]
    fn client_creation() {
        assert!(NominatimClient::new(NominatimConfig::default()).is_ok());
    }
}
