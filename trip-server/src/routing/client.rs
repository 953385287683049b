//! OSRM HTTP client.
//!
//! Provides async route queries against an OSRM `route` service.
//! Handles concurrency limiting and conversion to domain types.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, instrument};

use crate::domain::{GeoPoint, RouteAlternative};

use super::convert::convert_route_response;
use super::error::RoutingError;
use super::provider::{RouteProvider, RouteRequest};
use super::types::RouteResponse;

/// Default base URL: the public OSRM demo server.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config pointing at the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

/// OSRM route API client.
///
/// Uses a semaphore to limit concurrent requests.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new OSRM client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Build the request URL for a route query.
    fn route_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.base_url,
            request.transport.profile(),
            coordinate(request.from),
            coordinate(request.to),
        )
    }
}

/// OSRM expects `lon,lat`.
fn coordinate(point: GeoPoint) -> String {
    format!("{:.6},{:.6}", point.lon(), point.lat())
}

impl RouteProvider for OsrmClient {
    #[instrument(skip(self), fields(from = %request.from, to = %request.to))]
    async fn route(&self, request: &RouteRequest) -> Result<Vec<RouteAlternative>, RoutingError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutingError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.route_url(request);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("alternatives", request.alternatives.to_string()),
                ("overview", "full".to_string()),
                ("geometries", "geojson".to_string()),
                ("steps", "false".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimited);
        }

        let body = response.text().await?;

        // OSRM returns 400 with a JSON body for NoRoute/InvalidQuery, so
        // try to parse the body before giving up on the status.
        let parsed: Result<RouteResponse, _> = serde_json::from_str(&body);

        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(RoutingError::Json {
                    message: format!("{e} (body: {})", body.chars().take(500).collect::<String>()),
                });
            }
            Err(_) => {
                return Err(RoutingError::Api {
                    status: status.as_u16(),
                    message: body.chars().take(500).collect(),
                });
            }
        };

        let alternatives = convert_route_response(&parsed, status.as_u16())?;
        debug!(alternatives = alternatives.len(), "OSRM route response");
        Ok(alternatives)
    }
}
