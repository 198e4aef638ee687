//! Flight modes and the fuel each one burns.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// How a ship travels between waypoints.
///
/// The mode changes both the fuel consumed and the travel time.  Unknown
/// mode strings are rejected when parsed rather than mapped to a default.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightMode {
    #[default]
    Cruise,
    Burn,
    Drift,
    Stealth,
}

impl FlightMode {
    /// Fuel units needed to cover `distance` in this mode.
    ///
    /// | Mode             | Fuel                 |
    /// |------------------|----------------------|
    /// | Cruise / Stealth | `max(1, distance)`   |
    /// | Burn             | `max(2, 2*distance)` |
    /// | Drift            | `1`                  |
    pub fn fuel_cost(self, distance: u32) -> u32 {
        match self {
            FlightMode::Cruise | FlightMode::Stealth => distance.max(1),
            FlightMode::Burn => distance.saturating_mul(2).max(2),
            FlightMode::Drift => 1,
        }
    }

    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            FlightMode::Cruise  => "CRUISE",
            FlightMode::Burn    => "BURN",
            FlightMode::Drift   => "DRIFT",
            FlightMode::Stealth => "STEALTH",
        }
    }
}

impl FromStr for FlightMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRUISE"  => Ok(FlightMode::Cruise),
            "BURN"    => Ok(FlightMode::Burn),
            "DRIFT"   => Ok(FlightMode::Drift),
            "STEALTH" => Ok(FlightMode::Stealth),
            _ => Err(CoreError::UnknownFlightMode(s.to_owned())),
        }
    }
}

impl std::fmt::Display for FlightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
