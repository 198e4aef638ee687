//! Routing error type.

use thiserror::Error;

use st_core::WaypointSymbol;

/// Errors produced by `st-routing`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// The search exhausted every reachable state without popping the
    /// destination.  Retrying against the same graph cannot help.
    #[error("no route from {from} to {to}")]
    NoRoute { from: WaypointSymbol, to: WaypointSymbol },

    #[error("waypoint {0} not found in graph")]
    UnknownWaypoint(WaypointSymbol),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
