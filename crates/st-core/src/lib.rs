//! `st-core` — foundational types for the fleet controller workspace.
//!
//! This crate is a dependency of every other `st-*` crate.  It has no `st-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`symbol`]      | `ShipSymbol`, `WaypointSymbol`, `SystemSymbol`, `TradeSymbol` |
//! | [`geo`]         | `Coord`, truncated Euclidean distance                     |
//! | [`flight`]      | `FlightMode` and its fuel-consumption rule                |
//! | [`time`]        | `Timestamp`, remaining-duration helpers                   |
//! | [`config`]      | `FleetConfig` and its sections                            |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |

pub mod config;
pub mod error;
pub mod flight;
pub mod geo;
pub mod symbol;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ContractConfig, ControlConfig, ExtractionConfig, FleetConfig, MissingMarketPolicy,
    PlannerConfig, TradeConfig,
};
pub use error::{CoreError, CoreResult};
pub use flight::FlightMode;
pub use geo::Coord;
pub use symbol::{ShipSymbol, SystemSymbol, TradeSymbol, WaypointSymbol};
pub use time::{Timestamp, remaining};
