//! Multi-stop driving trip planner server.
//!
//! Takes a source and a list of destinations, geocodes the addresses,
//! fetches a driving route for every consecutive pair, keeps the fastest
//! alternative per leg and reports the legs with their totals.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod planner;
pub mod routing;
pub mod waypoints;
pub mod web;
