//! Geocoding service abstraction.

use std::future::Future;

use crate::domain::{GeoPoint, Place};

use super::error::GeocodeError;

/// Trait for geocoding services.
pub trait Geocoder: Send + Sync {
    /// Resolve free-form address text to candidate places, best first.
    ///
    /// Never returns an empty list: no candidates is
    /// [`GeocodeError::AddressNotFound`].
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<Place>, GeocodeError>> + Send;

    /// Resolve a coordinate to the place at that location.
    fn reverse(&self, point: GeoPoint) -> impl Future<Output = Result<Place, GeocodeError>> + Send;
}
