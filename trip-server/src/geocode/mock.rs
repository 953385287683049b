//! Mock geocoder for testing without network access.
//!
//! Answers lookups from a fixed table of addresses. Reverse lookups return
//! the nearest known place.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{GeoPoint, Place};

use super::address::normalize_query;
use super::error::GeocodeError;
use super::geocoder::Geocoder;

#[derive(Debug, Deserialize)]
struct FixturePlace {
    name: String,
    lat: f64,
    lon: f64,
}

/// Mock geocoder backed by an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    /// Candidates keyed by normalized query text.
    places: HashMap<String, Vec<Place>>,
}

impl MockGeocoder {
    /// Create an empty geocoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidates for an address.
    pub fn with_address(mut self, address: &str, candidates: Vec<Place>) -> Self {
        self.places.insert(normalize_query(address), candidates);
        self
    }

    /// Load a table from a JSON file.
    ///
    /// The file maps address text to candidate lists:
    /// `{ "Kanatna vulytsya": [{ "name": "..", "lat": .., "lon": .. }] }`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeocodeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GeocodeError::Api {
            status: 0,
            message: format!("Failed to read {path:?}: {e}"),
        })?;

        let table: HashMap<String, Vec<FixturePlace>> =
            serde_json::from_str(&json).map_err(|e| GeocodeError::Json {
                message: format!("Failed to parse {path:?}: {e}"),
            })?;

        let mut geocoder = Self::new();
        for (address, fixtures) in table {
            let candidates = fixtures
                .into_iter()
                .map(|f| {
                    GeoPoint::new(f.lat, f.lon)
                        .map(|point| Place::new(f.name, point))
                        .map_err(|e| GeocodeError::Json {
                            message: e.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            geocoder = geocoder.with_address(&address, candidates);
        }

        Ok(geocoder)
    }

    /// Number of known addresses.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true if no addresses are known.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<Vec<Place>, GeocodeError> {
        match self.places.get(&normalize_query(address)) {
            Some(candidates) if !candidates.is_empty() => Ok(candidates.clone()),
            _ => Err(GeocodeError::AddressNotFound(address.trim().to_string())),
        }
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Place, GeocodeError> {
        let distance = |p: &Place| {
            let dlat = p.point.lat() - point.lat();
            let dlon = p.point.lon() - point.lon();
            dlat * dlat + dlon * dlon
        };

        self.places
            .values()
            .flatten()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
            .cloned()
            .ok_or(GeocodeError::NoPlacemarkResolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn place(name: &str, lat: f64, lon: f64) -> Place {
        Place::new(name, GeoPoint::new(lat, lon).unwrap())
    }

    #[tokio::test]
    async fn lookup_is_case_and_space_insensitive() {
        let geocoder = MockGeocoder::new()
            .with_address("Kanatna vulytsya", vec![place("Kanatna St, Odesa", 46.47, 30.74)]);

        let found = geocoder.geocode("  kanatna   VULYTSYA ").await.unwrap();
        assert_eq!(found[0].name, "Kanatna St, Odesa");
    }

    #[tokio::test]
    async fn unknown_address_not_found() {
        let geocoder = MockGeocoder::new();
        let err = geocoder.geocode("Nowhere").await.unwrap_err();
        assert!(matches!(err, GeocodeError::AddressNotFound(ref a) if a == "Nowhere"));
    }

    #[tokio::test]
    async fn reverse_picks_nearest() {
        let geocoder = MockGeocoder::new()
            .with_address("a", vec![place("A", 46.0, 30.0)])
            .with_address("b", vec![place("B", 47.0, 31.0)]);

        let near_b = GeoPoint::new(46.9, 30.9).unwrap();
        assert_eq!(geocoder.reverse(near_b).await.unwrap().name, "B");
    }

    #[tokio::test]
    async fn reverse_with_no_places() {
        let geocoder = MockGeocoder::new();
        let point = GeoPoint::new(0.0, 0.0).unwrap();
        assert!(matches!(
            geocoder.reverse(point).await,
            Err(GeocodeError::NoPlacemarkResolved)
        ));
    }

    #[tokio::test]
    async fn load_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Chycherina vulytsya": [{{"name": "Chycherina St, Odesa", "lat": 46.48, "lon": 30.73}}]}}"#
        )
        .unwrap();

        let geocoder = MockGeocoder::load(file.path()).unwrap();
        assert_eq!(geocoder.len(), 1);

        let found = geocoder.geocode("chycherina vulytsya").await.unwrap();
        assert_eq!(found, vec![place("Chycherina St, Odesa", 46.48, 30.73)]);
    }
}
