//! Geographic coordinate types.

use std::fmt;

/// Fixed-point scale: coordinates are stored as integer micro-degrees.
const MICRO: f64 = 1_000_000.0;

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidGeoPoint {
    reason: &'static str,
}

/// A valid WGS84 coordinate.
///
/// Latitude is in [-90, 90] and longitude in [-180, 180]. Values are kept
/// as micro-degrees (about 11 cm at the equator), which makes the type
/// `Copy`, `Eq` and `Hash` so it can key caches and mock lookups.
///
/// # Examples
///
/// ```
/// use trip_server::domain::GeoPoint;
///
/// let odesa = GeoPoint::new(46.4825, 30.7233).unwrap();
/// assert_eq!(odesa.lat(), 46.4825);
///
/// // Out of range is rejected
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeoPoint {
    lat_e6: i32,
    lon_e6: i32,
}

impl GeoPoint {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidGeoPoint> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidGeoPoint {
                reason: "latitude and longitude must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidGeoPoint {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidGeoPoint {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(GeoPoint {
            lat_e6: (lat * MICRO).round() as i32,
            lon_e6: (lon * MICRO).round() as i32,
        })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        f64::from(self.lat_e6) / MICRO
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        f64::from(self.lon_e6) / MICRO
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({:.6}, {:.6})", self.lat(), self.lon())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat(), self.lon())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-range coordinate is accepted and survives within a micro-degree.
        #[test]
        fn in_range_roundtrip(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let p = GeoPoint::new(lat, lon).unwrap();
            prop_assert!((p.lat() - lat).abs() <= 1.0 / MICRO);
            prop_assert!((p.lon() - lon).abs() <= 1.0 / MICRO);
        }

        /// Latitudes beyond the poles are always rejected
        #[test]
        fn latitude_out_of_range_rejected(lat in 90.001f64..1000.0, lon in -180.0f64..=180.0) {
            prop_assert!(GeoPoint::new(lat, lon).is_err());
            prop_assert!(GeoPoint::new(-lat, lon).is_err());
        }
    }
}
