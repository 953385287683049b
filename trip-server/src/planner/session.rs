//! User-facing trip actions.
//!
//! Wires the waypoint store, geocoder, resolver and assembler together for
//! the three things a user does: look up an address, fill the source from
//! the device position, and ask for directions.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::{GeoPoint, Place};
use crate::geocode::{GeocodeError, Geocoder};
use crate::routing::RouteProvider;
use crate::waypoints::{WaypointError, WaypointStore};

use super::assemble::{TripView, assemble};
use super::resolve::{ResolveError, Resolver};

/// Error from a directions request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// The waypoints did not pass the gate
    #[error(transparent)]
    Waypoints(#[from] WaypointError),

    /// Route resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl PlanError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            PlanError::Waypoints(WaypointError::InsufficientWaypoints)
            | PlanError::Resolve(ResolveError::InsufficientWaypoints { .. }) => {
                "Enter a source and at least one destination."
            }
            PlanError::Waypoints(WaypointError::IndexOutOfRange { .. }) => "Unknown stop.",
            PlanError::Resolve(ResolveError::Cancelled) => "Directions request cancelled.",
            PlanError::Resolve(_) => "Directions not available.",
        }
    }
}

/// Error from an address lookup.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Waypoints(#[from] WaypointError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Receives the outcome of a directions request.
pub trait PresentationSink {
    /// Show a finished trip.
    fn show_trip(&mut self, trip: &TripView);

    /// Tell the user the request failed.
    fn show_failure(&mut self, error: &PlanError);
}

/// Plan directions through the store's resolved waypoints.
///
/// Exactly one sink method is called. The outcome is also returned.
pub async fn get_directions<P, S>(
    store: &WaypointStore,
    resolver: &Resolver<'_, P>,
    sink: &mut S,
) -> Result<TripView, PlanError>
where
    P: RouteProvider,
    S: PresentationSink,
{
    get_directions_with_cancel(store, resolver, sink, &CancellationToken::new()).await
}

/// Like [`get_directions`], stopping early if `cancel` fires.
pub async fn get_directions_with_cancel<P, S>(
    store: &WaypointStore,
    resolver: &Resolver<'_, P>,
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<TripView, PlanError>
where
    P: RouteProvider,
    S: PresentationSink,
{
    let outcome = plan(store, resolver, cancel).await;

    match &outcome {
        Ok(trip) => sink.show_trip(trip),
        Err(e) => sink.show_failure(e),
    }

    outcome
}

async fn plan<P: RouteProvider>(
    store: &WaypointStore,
    resolver: &Resolver<'_, P>,
    cancel: &CancellationToken,
) -> Result<TripView, PlanError> {
    store.ensure_can_resolve()?;

    let waypoints = store.active_waypoints(resolver.config().return_policy)?;
    let itinerary = resolver.resolve_with_cancel(&waypoints, cancel).await?;

    Ok(assemble(&itinerary))
}

/// Geocode the text of the waypoint at `index`.
///
/// Returns the candidates for the caller to choose from; the store is not
/// changed. Apply the choice with [`WaypointStore::set_location`].
pub async fn lookup_address<G: Geocoder>(
    geocoder: &G,
    store: &WaypointStore,
    index: usize,
) -> Result<Vec<Place>, LookupError> {
    let label = &store.get(index)?.label;
    let candidates = geocoder.geocode(label).await?;
    debug!(index, candidates = candidates.len(), "Address looked up");
    Ok(candidates)
}

/// Fill the source waypoint from a device coordinate.
///
/// The coordinate is reverse-geocoded; the source label becomes the
/// formatted address and its location the resolved place.
pub async fn locate_source<G: Geocoder>(
    geocoder: &G,
    store: &mut WaypointStore,
    point: GeoPoint,
) -> Result<Place, LookupError> {
    let place = geocoder.reverse(point).await?;

    store.set_label(0, place.name.clone())?;
    store.set_location(0, place.clone())?;

    info!(source = %place.name, "Source located");
    Ok(place)
}
