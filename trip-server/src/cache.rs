//! Caching layer for provider responses.
//!
//! Address lookups and leg routes are stable over minutes to hours, and the
//! same stops are often re-planned (swapping destinations, toggling the
//! return leg). Successful answers are cached; failures never are, so a
//! transient provider error is retried on the next request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{GeoPoint, Place, RouteAlternative};
use crate::geocode::{GeocodeError, Geocoder, normalize_query};
use crate::routing::{RouteProvider, RouteRequest, RoutingError};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached geocoding results.
    pub geocode_ttl: Duration,

    /// TTL for cached routes.
    pub route_ttl: Duration,

    /// Maximum number of cached entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            geocode_ttl: Duration::from_secs(24 * 60 * 60),
            route_ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Geocoder with caching.
///
/// Forward lookups are keyed by normalized address text, reverse lookups by
/// coordinate.
pub struct CachedGeocoder<G> {
    inner: G,
    forward: MokaCache<String, Arc<Vec<Place>>>,
    reverse: MokaCache<GeoPoint, Place>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let forward = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let reverse = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            inner,
            forward,
            reverse,
        }
    }

    /// Access the underlying geocoder for operations that bypass cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.forward.entry_count() + self.reverse.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.forward.invalidate_all();
        self.reverse.invalidate_all();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<Vec<Place>, GeocodeError> {
        let key = normalize_query(address);

        if let Some(cached) = self.forward.get(&key).await {
            trace!(%key, "Geocode cache hit");
            return Ok(cached.as_ref().clone());
        }

        let places = self.inner.geocode(address).await?;
        self.forward.insert(key, Arc::new(places.clone())).await;
        Ok(places)
    }

    async fn reverse(&self, point: GeoPoint) -> Result<Place, GeocodeError> {
        if let Some(cached) = self.reverse.get(&point).await {
            trace!(%point, "Reverse geocode cache hit");
            return Ok(cached);
        }

        let place = self.inner.reverse(point).await?;
        self.reverse.insert(point, place.clone()).await;
        Ok(place)
    }
}

/// Routing provider with caching, keyed by the full request.
pub struct CachedRouteProvider<P> {
    inner: P,
    routes: MokaCache<RouteRequest, Arc<Vec<RouteAlternative>>>,
}

impl<P: RouteProvider> CachedRouteProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.route_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

impl<P: RouteProvider> RouteProvider for CachedRouteProvider<P> {
    async fn route(&self, request: &RouteRequest) -> Result<Vec<RouteAlternative>, RoutingError> {
        if let Some(cached) = self.routes.get(request).await {
            trace!(from = %request.from, to = %request.to, "Route cache hit");
            return Ok(cached.as_ref().clone());
        }

        let alternatives = self.inner.route(request).await?;
        self.routes
            .insert(*request, Arc::new(alternatives.clone()))
            .await;
        Ok(alternatives)
    }
}
