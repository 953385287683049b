//! Trip planner.
//!
//! This module implements the core trip planning flow:
//! resolve a driving route for each consecutive pair of waypoints,
//! keep the fastest alternative per leg, and assemble the legs into
//! an itinerary for presentation.
//!
//! Legs are resolved one after another by default. Parallel mode requests
//! several legs at once but merges results by leg index, so both modes
//! produce the same itinerary and the same failure.

mod assemble;
mod config;
mod resolve;
mod session;


pub use assemble::{LegRecord, TripSummary, TripView, assemble, format_travel_time};
pub use config::{ResolveMode, ResolverConfig};
pub use resolve::{ResolveError, Resolver, select_fastest};
pub use session::{
    LookupError, PlanError, PresentationSink, get_directions, get_directions_with_cancel,
    locate_source, lookup_address,
};
