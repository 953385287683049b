//! Geocoding error types.

/// Errors from a geocoding service.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// Forward geocoding returned no candidates
    #[error("address not found: {0}")]
    AddressNotFound(String),

    /// Reverse geocoding resolved no placemark for the coordinate
    #[error("no placemark resolved for coordinate")]
    NoPlacemarkResolved,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Rate limited by the service
    #[error("rate limited by geocoding service")]
    RateLimited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::AddressNotFound("Kanatna vulytsya".into());
        assert_eq!(err.to_string(), "address not found: Kanatna vulytsya");

        assert_eq!(
            GeocodeError::NoPlacemarkResolved.to_string(),
            "no placemark resolved for coordinate"
        );

        let err = GeocodeError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");
    }
}
