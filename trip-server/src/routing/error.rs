//! Routing provider error types.

/// Errors from a routing provider.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Provider found no drivable route between the two points
    #[error("no route found")]
    NoRouteFound,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error status or error code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Rate limited by the provider
    #[error("rate limited by routing provider")]
    RateLimited,
}
