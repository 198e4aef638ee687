//! Remote resource snapshots.
//!
//! These mirror the JSON bodies the game API returns (camelCase on the wire).
//! Every mutating endpoint answers with a fresh copy of the sub-resource it
//! touched, and callers copy that copy over their mirror wholesale.

use serde::{Deserialize, Serialize};

use st_core::{
    Coord, FlightMode, ShipSymbol, SystemSymbol, Timestamp, TradeSymbol, WaypointSymbol,
};

/// Waypoint trait that marks a market, and with it a place to buy fuel.
pub const MARKETPLACE: &str = "MARKETPLACE";

/// Waypoint trait that marks a shipyard.
pub const SHIPYARD: &str = "SHIPYARD";

// ── Navigation ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavStatus {
    Docked,
    #[default]
    InOrbit,
    InTransit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavRoute {
    pub origin:         WaypointSymbol,
    pub destination:    WaypointSymbol,
    pub departure_time: Timestamp,
    pub arrival:        Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nav {
    pub system_symbol:   SystemSymbol,
    pub waypoint_symbol: WaypointSymbol,
    pub route:           NavRoute,
    pub status:          NavStatus,
    pub flight_mode:     FlightMode,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fuel {
    pub current:  u32,
    pub capacity: u32,
}

impl Fuel {
    /// Units needed to fill the tank.
    pub fn missing(&self) -> u32 {
        self.capacity.saturating_sub(self.current)
    }
}

// ── Cargo ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoItem {
    pub symbol: TradeSymbol,
    pub units:  u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    pub capacity:  u32,
    pub units:     u32,
    pub inventory: Vec<CargoItem>,
}

impl Cargo {
    pub fn units_of(&self, good: &str) -> u32 {
        self.inventory
            .iter()
            .find(|i| i.symbol == good)
            .map_or(0, |i| i.units)
    }

    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.units)
    }

    pub fn is_full(&self) -> bool {
        self.units >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.units == 0
    }

    /// Add `units` of `good`, merging into an existing stack.
    pub fn add(&mut self, good: &TradeSymbol, units: u32) {
        if units == 0 {
            return;
        }
        match self.inventory.iter_mut().find(|i| &i.symbol == good) {
            Some(item) => item.units += units,
            None => self.inventory.push(CargoItem { symbol: good.clone(), units }),
        }
        self.units += units;
    }

    /// Remove up to `units` of `good`; returns how many were removed.
    pub fn remove(&mut self, good: &str, units: u32) -> u32 {
        let Some(pos) = self.inventory.iter().position(|i| i.symbol == good) else {
            return 0;
        };
        let taken = units.min(self.inventory[pos].units);
        self.inventory[pos].units -= taken;
        if self.inventory[pos].units == 0 {
            self.inventory.remove(pos);
        }
        self.units -= taken;
        taken
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cooldown {
    pub total_seconds:     u32,
    pub remaining_seconds: u32,
    pub expiration:        Option<Timestamp>,
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipSnapshot {
    pub symbol:   ShipSymbol,
    /// Registration role reported by the API (`"EXCAVATOR"`, `"HAULER"`, …).
    #[serde(default)]
    pub role:     String,
    pub nav:      Nav,
    pub fuel:     Fuel,
    pub cargo:    Cargo,
    #[serde(default)]
    pub cooldown: Cooldown,
}

// ── Systems and waypoints ─────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub symbol: SystemSymbol,
    #[serde(rename = "type")]
    pub kind:   String,
    pub x:      i32,
    pub y:      i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub symbol:        WaypointSymbol,
    pub system_symbol: SystemSymbol,
    #[serde(rename = "type")]
    pub kind:          String,
    pub x:             i32,
    pub y:             i32,
    #[serde(default)]
    pub traits:        Vec<String>,
}

impl Waypoint {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    pub fn has_trait(&self, t: &str) -> bool {
        self.traits.iter().any(|x| x == t)
    }
}

// ── Markets ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeKind {
    Export,
    Import,
    Exchange,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeGood {
    pub symbol:         TradeSymbol,
    #[serde(rename = "type")]
    pub kind:           TradeKind,
    /// Most units the market will trade in one transaction.
    pub trade_volume:   u32,
    /// Price the ship pays per unit.
    pub purchase_price: u32,
    /// Price the ship receives per unit.
    pub sell_price:     u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub symbol:      WaypointSymbol,
    #[serde(default)]
    pub imports:     Vec<TradeSymbol>,
    #[serde(default)]
    pub exports:     Vec<TradeSymbol>,
    #[serde(default)]
    pub exchange:    Vec<TradeSymbol>,
    #[serde(default)]
    pub trade_goods: Vec<TradeGood>,
}

impl Market {
    pub fn trade_good(&self, good: &str) -> Option<&TradeGood> {
        self.trade_goods.iter().find(|g| g.symbol == good)
    }

    /// Per-transaction volume for `good`, 0 if the market does not list it.
    pub fn trade_volume(&self, good: &str) -> u32 {
        self.trade_good(good).map_or(0, |g| g.trade_volume)
    }

    /// `true` if a ship can sell `good` here.
    pub fn buys(&self, good: &str) -> bool {
        self.imports.iter().chain(&self.exchange).any(|g| g == good)
            || self
                .trade_good(good)
                .is_some_and(|g| matches!(g.kind, TradeKind::Import | TradeKind::Exchange))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipyard {
    pub symbol:     WaypointSymbol,
    #[serde(default)]
    pub ship_types: Vec<String>,
}

// ── Extraction ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub signature:  String,
    pub symbol:     WaypointSymbol,
    pub deposits:   Vec<TradeSymbol>,
    pub expiration: Timestamp,
    pub size:       String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionYield {
    pub symbol: TradeSymbol,
    pub units:  u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub ship_symbol: ShipSymbol,
    #[serde(rename = "yield")]
    pub yielded:     ExtractionYield,
}

// ── Contracts ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub on_accepted:  i64,
    pub on_fulfilled: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverTerm {
    pub trade_symbol:       TradeSymbol,
    pub destination_symbol: WaypointSymbol,
    pub units_required:     u32,
    pub units_fulfilled:    u32,
}

impl DeliverTerm {
    pub fn remaining(&self) -> u32 {
        self.units_required.saturating_sub(self.units_fulfilled)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    pub deadline: Timestamp,
    pub payment:  Payment,
    #[serde(default)]
    pub deliver:  Vec<DeliverTerm>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractData {
    pub id:                 String,
    pub faction_symbol:     String,
    #[serde(rename = "type")]
    pub kind:               String,
    pub terms:              ContractTerms,
    pub accepted:           bool,
    pub fulfilled:          bool,
    pub deadline_to_accept: Option<Timestamp>,
}

// ── Composite responses ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigateResult {
    pub nav:  Nav,
    pub fuel: Fuel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResult {
    pub extraction: Extraction,
    pub cargo:      Cargo,
    pub cooldown:   Cooldown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResult {
    pub surveys:  Vec<Survey>,
    pub cooldown: Cooldown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverResult {
    pub contract: ContractData,
    pub cargo:    Cargo,
}
