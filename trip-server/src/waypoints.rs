//! Waypoint store.
//!
//! Holds the ordered stops the user has entered (source first, then
//! destinations) and derives the list of stops that can actually be routed.
//! A stop only takes part in routing once geocoding has resolved it, and any
//! edit to its text invalidates that resolution.

use crate::domain::{Location, Place, ResolvedWaypoint, Waypoint};

/// Errors from waypoint store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaypointError {
    /// Index does not name a slot in the store
    #[error("waypoint index {index} out of range (store has {len} waypoints)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Not enough resolved waypoints to plan a trip
    #[error("not enough resolved waypoints: need the source and at least one destination")]
    InsufficientWaypoints,
}

/// Whether the active waypoint list closes the loop back to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Append the first resolved waypoint again, so the trip ends where it began
    #[default]
    RoundTrip,
    /// Stop at the last resolved waypoint
    OneWay,
}

/// Ordered collection of waypoints.
///
/// Slot 0 is the source; the remaining slots are destinations in visiting
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    /// Create the standard trip layout: one source and two destinations.
    pub fn trip() -> Self {
        Self::with_labels(["", "", ""])
    }

    /// Create a store with one unresolved waypoint per label.
    ///
    /// An empty label list still yields a single (source) slot.
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut waypoints: Vec<Waypoint> = labels.into_iter().map(Waypoint::new).collect();
        if waypoints.is_empty() {
            waypoints.push(Waypoint::default());
        }
        Self { waypoints }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false: a store has at least the source slot.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All slots in order, resolved or not.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The waypoint at `index`.
    pub fn get(&self, index: usize) -> Result<&Waypoint, WaypointError> {
        let len = self.waypoints.len();
        self.waypoints
            .get(index)
            .ok_or(WaypointError::IndexOutOfRange { index, len })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Waypoint, WaypointError> {
        let len = self.waypoints.len();
        self.waypoints
            .get_mut(index)
            .ok_or(WaypointError::IndexOutOfRange { index, len })
    }

    /// Record the geocoded place for the waypoint at `index`.
    ///
    /// The label is left untouched.
    pub fn set_location(&mut self, index: usize, place: Place) -> Result<(), WaypointError> {
        self.slot_mut(index)?.location = Location::Resolved(place);
        Ok(())
    }

    /// Forget the resolved place for the waypoint at `index`.
    pub fn clear_location(&mut self, index: usize) -> Result<(), WaypointError> {
        self.slot_mut(index)?.location = Location::Unresolved;
        Ok(())
    }

    /// Replace the text of the waypoint at `index`.
    ///
    /// Editing always clears the resolved location, so a stale place can
    /// never be routed.
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<(), WaypointError> {
        let slot = self.slot_mut(index)?;
        slot.label = label.into();
        slot.location = Location::Unresolved;
        Ok(())
    }

    /// Swap two slots, label and location together.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), WaypointError> {
        let len = self.waypoints.len();
        for index in [a, b] {
            if index >= len {
                return Err(WaypointError::IndexOutOfRange { index, len });
            }
        }
        self.waypoints.swap(a, b);
        Ok(())
    }

    /// Swap the first and second destinations.
    pub fn swap_destinations(&mut self) -> Result<(), WaypointError> {
        self.swap(1, 2)
    }

    /// Whether trip resolution may start.
    ///
    /// Requires the source to be resolved and at least one destination to
    /// be resolved.
    pub fn can_resolve(&self) -> bool {
        let Some((source, destinations)) = self.waypoints.split_first() else {
            return false;
        };
        source.location.is_resolved() && destinations.iter().any(|w| w.location.is_resolved())
    }

    /// Like [`can_resolve`](Self::can_resolve), as a `Result`.
    pub fn ensure_can_resolve(&self) -> Result<(), WaypointError> {
        if self.can_resolve() {
            Ok(())
        } else {
            Err(WaypointError::InsufficientWaypoints)
        }
    }

    /// The resolved waypoints, in order, ready for routing.
    ///
    /// Unresolved slots are skipped. With [`ReturnPolicy::RoundTrip`] the
    /// first resolved waypoint is appended again as the final stop.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientWaypoints` if no waypoint is resolved.
    pub fn active_waypoints(
        &self,
        policy: ReturnPolicy,
    ) -> Result<Vec<ResolvedWaypoint>, WaypointError> {
        let mut active: Vec<ResolvedWaypoint> =
            self.waypoints.iter().filter_map(Waypoint::resolved).collect();

        let first = active
            .first()
            .cloned()
            .ok_or(WaypointError::InsufficientWaypoints)?;

        if policy == ReturnPolicy::RoundTrip {
            active.push(first);
        }

        Ok(active)
    }
}

impl Default for WaypointStore {
    fn default() -> Self {
        Self::trip()
    }
}
