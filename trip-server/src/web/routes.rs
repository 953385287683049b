//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::domain::{GeoPoint, Place};
use crate::geocode::{GeocodeError, Geocoder};
use crate::planner::{
    LookupError, PlanError, PresentationSink, ResolveError, Resolver, TripView, get_directions,
    locate_source, lookup_address,
};
use crate::routing::RouteProvider;
use crate::waypoints::{ReturnPolicy, WaypointStore};

use super::dto::*;
use super::state::AppState;

/// Default number of candidates for an address lookup.
const DEFAULT_GEOCODE_LIMIT: usize = 5;

/// Upper bound on candidates for an address lookup.
const MAX_GEOCODE_LIMIT: usize = 20;

/// Most stops a plan request may carry: the source and two destinations.
const MAX_STOPS: usize = 3;

/// Create the application router.
pub fn create_router<G, P>(state: AppState<G, P>) -> Router
where
    G: Geocoder + 'static,
    P: RouteProvider + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/geocode", get(geocode::<G, P>))
        .route("/reverse", get(reverse::<G, P>))
        .route("/trip/plan", post(plan_trip::<G, P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Look up candidate places for an address.
async fn geocode<G: Geocoder, P: RouteProvider>(
    State(state): State<AppState<G, P>>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    if req.q.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "Address must not be empty".to_string(),
        });
    }

    let limit = req
        .limit
        .unwrap_or(DEFAULT_GEOCODE_LIMIT)
        .clamp(1, MAX_GEOCODE_LIMIT);
    let store = WaypointStore::with_labels([req.q.as_str()]);
    let places = lookup_address(state.geocoder.as_ref(), &store, 0).await?;

    Ok(Json(GeocodeResponse {
        places: places.iter().take(limit).map(PlaceResult::from_place).collect(),
    }))
}

/// Locate the source from a device coordinate.
async fn reverse<G: Geocoder, P: RouteProvider>(
    State(state): State<AppState<G, P>>,
    Query(req): Query<ReverseQuery>,
) -> Result<Json<PlaceResult>, AppError> {
    let point = GeoPoint::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let mut store = WaypointStore::trip();
    let place = locate_source(state.geocoder.as_ref(), &mut store, point).await?;
    Ok(Json(PlaceResult::from_place(&place)))
}

/// Plan a trip through the given stops.
async fn plan_trip<G: Geocoder, P: RouteProvider>(
    State(state): State<AppState<G, P>>,
    body: Bytes,
) -> Result<Json<PlanTripResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    if req.stops.len() > MAX_STOPS {
        return Err(AppError::BadRequest {
            message: format!(
                "At most {MAX_STOPS} stops are allowed, got {}",
                req.stops.len()
            ),
        });
    }

    let store = build_store(state.geocoder.as_ref(), &req.stops).await?;

    let config = match req.round_trip {
        Some(true) => state.config.as_ref().clone().with_return_policy(ReturnPolicy::RoundTrip),
        Some(false) => state.config.as_ref().clone().with_return_policy(ReturnPolicy::OneWay),
        None => state.config.as_ref().clone(),
    };
    let resolver = Resolver::new(state.routing.as_ref(), &config);

    let trip = get_directions(&store, &resolver, &mut TracingSink).await?;
    Ok(Json(PlanTripResponse::from_trip(&trip)))
}

/// Fill a waypoint store from request stops.
///
/// Located stops are taken as given; address stops are geocoded and the
/// first candidate is used. Null stops stay unresolved.
async fn build_store<G: Geocoder>(
    geocoder: &G,
    stops: &[Option<StopInput>],
) -> Result<WaypointStore, AppError> {
    let labels = stops
        .iter()
        .map(|stop| stop.as_ref().map(|s| s.label().to_string()).unwrap_or_default());
    let mut store = WaypointStore::with_labels(labels);

    for (index, stop) in stops.iter().enumerate() {
        let place = match stop {
            None => continue,
            Some(StopInput::Point { label, lat, lon }) => {
                let point = GeoPoint::new(*lat, *lon).map_err(|e| AppError::BadRequest {
                    message: format!("Stop {index}: {e}"),
                })?;
                Place::new(label.clone(), point)
            }
            Some(StopInput::Address { address, .. }) => {
                let candidates = geocoder.geocode(address).await?;
                candidates
                    .into_iter()
                    .next()
                    .ok_or_else(|| GeocodeError::AddressNotFound(address.clone()))?
            }
        };

        store
            .set_location(index, place)
            .map_err(|e| AppError::Internal {
                message: e.to_string(),
            })?;
    }

    Ok(store)
}

/// Logs the outcome of each directions request.
struct TracingSink;

impl PresentationSink for TracingSink {
    fn show_trip(&mut self, trip: &TripView) {
        info!(legs = trip.legs.len(), summary = %trip.summary.describe(), "Trip planned");
    }

    fn show_failure(&mut self, error: &PlanError) {
        warn!(error = %error, message = error.user_message(), "Trip planning failed");
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        match e {
            GeocodeError::AddressNotFound(_) | GeocodeError::NoPlacemarkResolved => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            _ => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::Waypoints(e) => AppError::BadRequest {
                message: e.to_string(),
            },
            LookupError::Geocode(e) => e.into(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.user_message().to_string();
        match e {
            PlanError::Waypoints(_) | PlanError::Resolve(ResolveError::InsufficientWaypoints { .. }) => {
                AppError::BadRequest { message }
            }
            PlanError::Resolve(ResolveError::RouteUnavailable { .. }) => {
                AppError::BadGateway { message }
            }
            PlanError::Resolve(_) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "Request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
