//! Multi-leg route resolution.
//!
//! Turns an ordered list of resolved waypoints into an itinerary by asking
//! the routing provider for each consecutive pair and keeping the fastest
//! alternative. A single failing leg fails the whole run; callers never see
//! a partial itinerary.

use chrono::Duration;
use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{DomainError, Itinerary, ResolvedWaypoint, RouteAlternative, RouteLeg};
use crate::routing::{RouteProvider, RouteRequest};

use super::config::{ResolveMode, ResolverConfig};

/// Error from route resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// Fewer than two waypoints, so there is no leg to route
    #[error("need at least two waypoints to resolve a route, got {found}")]
    InsufficientWaypoints { found: usize },

    /// A leg could not be routed; the whole run is abandoned
    #[error("route unavailable for leg {leg} ({from} -> {to}): {reason}")]
    RouteUnavailable {
        leg: usize,
        from: String,
        to: String,
        reason: String,
    },

    /// The run was cancelled before it finished
    #[error("route resolution cancelled")]
    Cancelled,

    /// Resolved legs failed itinerary validation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Pick the alternative with the shortest travel time.
///
/// Ties go to the alternative listed first. Returns `None` for an empty
/// set.
pub fn select_fastest(alternatives: &[RouteAlternative]) -> Option<&RouteAlternative> {
    // min_by_key keeps the first of several equal minima.
    alternatives.iter().min_by_key(|alt| alt.travel_time)
}

/// Running state of one resolution run.
///
/// Lives only as long as the run; dropped on success or failure.
#[derive(Debug)]
struct ResolutionState {
    current_index: usize,
    accumulated_time: Duration,
    accumulated_distance: f64,
    legs_so_far: Vec<RouteLeg>,
}

impl ResolutionState {
    fn new(leg_count: usize) -> Self {
        Self {
            current_index: 0,
            accumulated_time: Duration::zero(),
            accumulated_distance: 0.0,
            legs_so_far: Vec::with_capacity(leg_count),
        }
    }

    /// Record the leg at `current_index` and advance.
    ///
    /// A leg that would overflow the total travel time makes the trip
    /// unavailable at that leg.
    fn push(&mut self, leg: RouteLeg) -> Result<(), ResolveError> {
        let Some(total) = self.accumulated_time.checked_add(&leg.travel_time()) else {
            return Err(ResolveError::RouteUnavailable {
                leg: self.current_index,
                from: leg.start_label,
                to: leg.end_label,
                reason: "total travel time out of range".to_string(),
            });
        };

        self.accumulated_time = total;
        self.accumulated_distance += leg.distance_m();
        self.legs_so_far.push(leg);
        self.current_index += 1;
        Ok(())
    }

    fn finish(self) -> Result<Itinerary, ResolveError> {
        Ok(Itinerary::new(
            self.legs_so_far,
            self.accumulated_time,
            self.accumulated_distance,
        )?)
    }
}

/// Resolves trips leg by leg against a routing provider.
pub struct Resolver<'a, P: RouteProvider> {
    provider: &'a P,
    config: &'a ResolverConfig,
}

impl<'a, P: RouteProvider> Resolver<'a, P> {
    /// Create a new resolver.
    pub fn new(provider: &'a P, config: &'a ResolverConfig) -> Self {
        Self { provider, config }
    }

    /// The configuration this resolver runs with.
    pub fn config(&self) -> &ResolverConfig {
        self.config
    }

    /// Resolve a route through all `waypoints`, in order.
    pub async fn resolve(&self, waypoints: &[ResolvedWaypoint]) -> Result<Itinerary, ResolveError> {
        self.resolve_with_cancel(waypoints, &CancellationToken::new())
            .await
    }

    /// Resolve a route, stopping early if `cancel` fires.
    ///
    /// Cancellation yields [`ResolveError::Cancelled`]; no partial result is
    /// returned.
    pub async fn resolve_with_cancel(
        &self,
        waypoints: &[ResolvedWaypoint],
        cancel: &CancellationToken,
    ) -> Result<Itinerary, ResolveError> {
        if waypoints.len() < 2 {
            return Err(ResolveError::InsufficientWaypoints {
                found: waypoints.len(),
            });
        }

        let leg_count = waypoints.len() - 1;
        info!(legs = leg_count, mode = ?self.config.mode, "Resolving trip");

        let result = match self.config.mode {
            ResolveMode::Sequential => self.resolve_sequential(waypoints, cancel).await,
            ResolveMode::Parallel { batch_size } => {
                self.resolve_parallel(waypoints, batch_size, cancel).await
            }
        };

        match result {
            Ok(state) => {
                let itinerary = state.finish()?;
                info!(
                    legs = itinerary.leg_count(),
                    total_secs = itinerary.total_time().num_seconds(),
                    total_m = itinerary.total_distance_m(),
                    "Trip resolved"
                );
                Ok(itinerary)
            }
            Err(e) => {
                warn!(error = %e, "Trip resolution failed");
                Err(e)
            }
        }
    }

    /// One leg at a time, threading the running totals through.
    async fn resolve_sequential(
        &self,
        waypoints: &[ResolvedWaypoint],
        cancel: &CancellationToken,
    ) -> Result<ResolutionState, ResolveError> {
        let mut state = ResolutionState::new(waypoints.len() - 1);

        while state.current_index + 1 < waypoints.len() {
            let i = state.current_index;
            let leg = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
                leg = self.resolve_leg(i, &waypoints[i], &waypoints[i + 1]) => leg?,
            };
            state.push(leg)?;
        }

        Ok(state)
    }

    /// Batches of legs in flight together; results are merged by leg index
    /// so the outcome matches sequential mode.
    async fn resolve_parallel(
        &self,
        waypoints: &[ResolvedWaypoint],
        batch_size: usize,
        cancel: &CancellationToken,
    ) -> Result<ResolutionState, ResolveError> {
        let mut state = ResolutionState::new(waypoints.len() - 1);
        let pairs: Vec<(usize, &[ResolvedWaypoint])> = waypoints.windows(2).enumerate().collect();

        for batch in pairs.chunks(batch_size.max(1)) {
            let futures: Vec<_> = batch
                .iter()
                .map(|(i, pair)| self.resolve_leg(*i, &pair[0], &pair[1]))
                .collect();

            let results = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
                results = join_all(futures) => results,
            };

            // join_all preserves input order, so the first error is the
            // lowest failing leg index.
            for result in results {
                state.push(result?)?;
            }
        }

        Ok(state)
    }

    /// Request one leg and pick its fastest alternative.
    async fn resolve_leg(
        &self,
        index: usize,
        from: &ResolvedWaypoint,
        to: &ResolvedWaypoint,
    ) -> Result<RouteLeg, ResolveError> {
        let unavailable = |reason: String| ResolveError::RouteUnavailable {
            leg: index,
            from: from.label.clone(),
            to: to.label.clone(),
            reason,
        };

        let request = RouteRequest::driving(from.point(), to.point());
        let alternatives = self
            .provider
            .route(&request)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let fastest = select_fastest(&alternatives)
            .ok_or_else(|| unavailable("provider returned no alternatives".to_string()))?;

        debug!(
            leg = index,
            from = %from.label,
            to = %to.label,
            alternatives = alternatives.len(),
            secs = fastest.travel_time.num_seconds(),
            metres = fastest.distance_m,
            "Leg resolved"
        );

        Ok(RouteLeg::new(
            from.label.clone(),
            to.label.clone(),
            fastest.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteGeometry;

    fn alt(secs: i64, metres: f64) -> RouteAlternative {
        RouteAlternative::new(RouteGeometry::default(), Duration::seconds(secs), metres)
    }

    #[test]
    fn fastest_of_empty_is_none() {
        assert!(select_fastest(&[]).is_none());
    }

    #[test]
    fn fastest_picks_minimum_time() {
        let alts = [alt(10, 5000.0), alt(8, 4800.0), alt(9, 100.0)];
        assert_eq!(select_fastest(&alts), Some(&alts[1]));
    }

    #[test]
    fn fastest_tie_goes_to_first() {
        let alts = [alt(10, 5000.0), alt(8, 4800.0), alt(8, 1.0)];
        let chosen = select_fastest(&alts).unwrap();
        assert_eq!(chosen.distance_m, 4800.0);
    }

    #[test]
    fn state_accumulates() {
        let mut state = ResolutionState::new(2);
        state.push(RouteLeg::new("A", "B", alt(60, 1000.0))).unwrap();
        state.push(RouteLeg::new("B", "C", alt(30, 500.0))).unwrap();

        assert_eq!(state.current_index, 2);
        let itinerary = state.finish().unwrap();
        assert_eq!(itinerary.total_time(), Duration::seconds(90));
        assert_eq!(itinerary.total_distance_m(), 1500.0);
    }

    #[test]
    fn state_rejects_overflowing_total() {
        let huge = RouteAlternative::new(
            RouteGeometry::default(),
            Duration::milliseconds(i64::MAX),
            1.0,
        );
        let mut state = ResolutionState::new(2);
        state.push(RouteLeg::new("A", "B", huge.clone())).unwrap();

        let err = state.push(RouteLeg::new("B", "C", huge)).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::RouteUnavailable { leg: 1, ref from, ref to, .. } if from == "B" && to == "C"
        ));
        assert_eq!(state.current_index, 1);
    }

    #[test]
    fn error_display() {
        let err = ResolveError::RouteUnavailable {
            leg: 1,
            from: "B".into(),
            to: "C".into(),
            reason: "no route found".into(),
        };
        assert_eq!(
            err.to_string(),
            "route unavailable for leg 1 (B -> C): no route found"
        );
        assert_eq!(
            ResolveError::InsufficientWaypoints { found: 1 }.to_string(),
            "need at least two waypoints to resolve a route, got 1"
        );
    }
}
