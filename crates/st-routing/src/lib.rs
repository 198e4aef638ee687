//! `st-routing` — fuel-aware route planning over a system's waypoints.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `WaypointGraph` (complete graph) and its builder            |
//! | [`planner`] | `RoutePlanner` trait, `FuelPlanner` Dijkstra, `Route`/`Hop` |
//! | [`error`]   | `RoutingError`, `RoutingResult`                             |
//!
//! The fuel rule per flight mode lives on [`st_core::FlightMode::fuel_cost`]
//! and is re-exported here as [`fuel_cost`].

pub mod error;
pub mod graph;
pub mod planner;

#[cfg(test)]
mod tests;

pub use error::{RoutingError, RoutingResult};
pub use graph::{Edge, GraphNode, WaypointGraph, WaypointGraphBuilder};
pub use planner::{FuelGauge, FuelPlanner, Hop, HopKind, Route, RoutePlanner};

use st_core::FlightMode;

/// Fuel units to fly `distance` in `mode`.
#[inline]
pub fn fuel_cost(distance: u32, mode: FlightMode) -> u32 {
    mode.fuel_cost(distance)
}
