//! Geocoding integration.
//!
//! Turns address text into candidate [`Place`](crate::domain::Place)s and
//! device coordinates back into addresses. Choosing among candidates is
//! left to the caller.

mod address;
mod client;
mod error;
mod geocoder;
mod mock;

pub use address::{format_address, normalize_query};
pub use client::{NominatimClient, NominatimConfig, NominatimPlace};
pub use error::GeocodeError;
pub use geocoder::Geocoder;
pub use mock::MockGeocoder;
