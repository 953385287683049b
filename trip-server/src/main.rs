use std::net::SocketAddr;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use trip_server::cache::{CacheConfig, CachedGeocoder, CachedRouteProvider};
use trip_server::config::AppConfig;
use trip_server::geocode::{Geocoder, MockGeocoder, NominatimClient};
use trip_server::routing::{MockRouteProvider, OsrmClient, RouteProvider};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,trip_server=debug")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    info!(mode = ?config.resolver.mode, policy = ?config.resolver.return_policy, "Configuration loaded");

    match &config.mock_dir {
        Some(dir) => {
            let (geocoder, routing) = load_mocks(dir);
            let state = AppState::new(geocoder, routing, config.resolver.clone());
            serve(state, config.bind_addr).await;
        }
        None => {
            let cache_config = CacheConfig::default();

            let nominatim =
                NominatimClient::new(config.nominatim.clone()).expect("Failed to create Nominatim client");
            let osrm = OsrmClient::new(config.osrm.clone()).expect("Failed to create OSRM client");
            info!(
                nominatim = %config.nominatim.base_url,
                osrm = %config.osrm.base_url,
                "Using live providers"
            );

            let state = AppState::new(
                CachedGeocoder::new(nominatim, &cache_config),
                CachedRouteProvider::new(osrm, &cache_config),
                config.resolver.clone(),
            );
            serve(state, config.bind_addr).await;
        }
    }
}

/// Load offline fixtures from `places.json` and `routes.json`.
fn load_mocks(dir: &Path) -> (MockGeocoder, MockRouteProvider) {
    let geocoder =
        MockGeocoder::load(dir.join("places.json")).expect("Failed to load mock places");
    let routing =
        MockRouteProvider::load(dir.join("routes.json")).expect("Failed to load mock routes");
    info!(dir = %dir.display(), addresses = geocoder.len(), "Using mock providers");
    (geocoder, routing)
}

async fn serve<G, P>(state: AppState<G, P>, addr: SocketAddr)
where
    G: Geocoder + 'static,
    P: RouteProvider + 'static,
{
    let app = create_router(state);

    info!("Trip planner listening on http://{addr}");
    info!("  GET  /health      - Health check");
    info!("  GET  /geocode     - Look up an address");
    info!("  GET  /reverse     - Place at a coordinate");
    info!("  POST /trip/plan   - Plan a trip");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
