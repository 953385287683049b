//! Application state for the web layer.

use std::sync::Arc;

use crate::geocode::Geocoder;
use crate::planner::ResolverConfig;
use crate::routing::RouteProvider;

/// Shared application state.
///
/// Generic over the providers so the same router serves the real services
/// and the offline mocks.
pub struct AppState<G, P> {
    /// Address lookup service
    pub geocoder: Arc<G>,

    /// Routing service
    pub routing: Arc<P>,

    /// Trip resolution configuration
    pub config: Arc<ResolverConfig>,
}

impl<G: Geocoder, P: RouteProvider> AppState<G, P> {
    /// Create a new app state.
    pub fn new(geocoder: G, routing: P, config: ResolverConfig) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            routing: Arc::new(routing),
            config: Arc::new(config),
        }
    }
}

// Derived Clone would require G: Clone and P: Clone.
impl<G, P> Clone for AppState<G, P> {
    fn clone(&self) -> Self {
        Self {
            geocoder: Arc::clone(&self.geocoder),
            routing: Arc::clone(&self.routing),
            config: Arc::clone(&self.config),
        }
    }
}
