//! The `MarketCache` collaborator trait and its in-memory implementation.
//!
//! # Consistency
//!
//! The cache is eventually consistent and best-effort.  A miss or a stale
//! read makes plans worse, never crashes a caller: every query returns an
//! empty collection rather than an error when it simply knows nothing.  No
//! caller assumes a transaction spans more than one call.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use st_api::{ContractData, Market, ShipSnapshot, Shipyard, TradeKind, Waypoint};
use st_core::{ShipSymbol, SystemSymbol, TradeSymbol, WaypointSymbol};

use crate::CacheResult;

// ── MarketTrade ───────────────────────────────────────────────────────────────

/// A profitable pair: buy `good` at `source`, sell it at `buyer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketTrade {
    pub good:       TradeSymbol,
    pub source:     WaypointSymbol,
    pub buyer:      WaypointSymbol,
    /// Price paid per unit at `source`.
    pub buy_price:  u32,
    /// Price received per unit at `buyer`.
    pub sell_price: u32,
    /// Smaller of the two markets' per-transaction volumes.
    pub volume:     u32,
}

impl MarketTrade {
    /// Per-unit margin.
    pub fn gross(&self) -> i64 {
        i64::from(self.sell_price) - i64::from(self.buy_price)
    }
}

// ── MarketCache trait ─────────────────────────────────────────────────────────

/// Read/write access to cached universe snapshots.
///
/// Implementations must tolerate concurrent readers and writers; how they
/// lock is their own business.  Shared as `Arc<dyn MarketCache>`.
pub trait MarketCache: Send + Sync {
    // ── Reads ─────────────────────────────────────────────────────────────

    /// Every known waypoint of `system`, in symbol order.
    fn system_waypoints(&self, system: &SystemSymbol) -> CacheResult<Vec<Waypoint>>;

    fn waypoint(&self, symbol: &WaypointSymbol) -> CacheResult<Option<Waypoint>>;

    /// `false` for unknown waypoints.
    fn waypoint_has_trait(&self, symbol: &WaypointSymbol, trait_symbol: &str) -> CacheResult<bool>;

    fn market(&self, symbol: &WaypointSymbol) -> CacheResult<Option<Market>>;

    fn shipyard(&self, symbol: &WaypointSymbol) -> CacheResult<Option<Shipyard>>;

    /// `true` if the cached market at `waypoint` sells `good` to ships.
    fn market_sells(&self, waypoint: &WaypointSymbol, good: &str) -> CacheResult<bool>;

    /// Markets that buy any of `goods`, the one accepting the most goods first.
    fn markets_importing(&self, goods: &[TradeSymbol]) -> CacheResult<Vec<WaypointSymbol>>;

    /// Markets that sell `good`, cheapest asking price first.
    fn export_waypoints_for_good(&self, good: &str) -> CacheResult<Vec<WaypointSymbol>>;

    /// Source/buyer pairs whose per-unit margin exceeds `min_gross`, best first.
    fn market_trades(&self, min_gross: i64) -> CacheResult<Vec<MarketTrade>>;

    fn fleet(&self) -> CacheResult<Vec<ShipSnapshot>>;

    fn contracts(&self) -> CacheResult<Vec<ContractData>>;

    // ── Writes ────────────────────────────────────────────────────────────

    fn upsert_market(&self, market: &Market) -> CacheResult<()>;

    fn upsert_shipyard(&self, shipyard: &Shipyard) -> CacheResult<()>;

    fn upsert_waypoints(&self, waypoints: &[Waypoint]) -> CacheResult<()>;

    fn upsert_fleet(&self, ships: &[ShipSnapshot]) -> CacheResult<()>;

    fn upsert_contracts(&self, contracts: &[ContractData]) -> CacheResult<()>;
}

// ── InMemoryCache ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    waypoints: BTreeMap<WaypointSymbol, Waypoint>,
    markets:   BTreeMap<WaypointSymbol, Market>,
    shipyards: BTreeMap<WaypointSymbol, Shipyard>,
    fleet:     BTreeMap<ShipSymbol, ShipSnapshot>,
    contracts: BTreeMap<String, ContractData>,
}

/// A `MarketCache` held entirely in memory behind one reader-writer lock.
#[derive(Default)]
pub struct InMemoryCache {
    tables: RwLock<Tables>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with waypoints (e.g. from [`crate::load_waypoints_csv`]).
    pub fn with_waypoints(self, waypoints: &[Waypoint]) -> Self {
        {
            let mut t = self.tables.write();
            for wp in waypoints {
                t.waypoints.insert(wp.symbol.clone(), wp.clone());
            }
        }
        self
    }

    pub fn with_market(self, market: Market) -> Self {
        self.tables.write().markets.insert(market.symbol.clone(), market);
        self
    }

    pub fn market_count(&self) -> usize {
        self.tables.read().markets.len()
    }
}

impl MarketCache for InMemoryCache {
    fn system_waypoints(&self, system: &SystemSymbol) -> CacheResult<Vec<Waypoint>> {
        Ok(self
            .tables
            .read()
            .waypoints
            .values()
            .filter(|wp| &wp.system_symbol == system)
            .cloned()
            .collect())
    }

    fn waypoint(&self, symbol: &WaypointSymbol) -> CacheResult<Option<Waypoint>> {
        Ok(self.tables.read().waypoints.get(symbol).cloned())
    }

    fn waypoint_has_trait(&self, symbol: &WaypointSymbol, trait_symbol: &str) -> CacheResult<bool> {
        Ok(self
            .tables
            .read()
            .waypoints
            .get(symbol)
            .is_some_and(|wp| wp.has_trait(trait_symbol)))
    }

    fn market(&self, symbol: &WaypointSymbol) -> CacheResult<Option<Market>> {
        Ok(self.tables.read().markets.get(symbol).cloned())
    }

    fn shipyard(&self, symbol: &WaypointSymbol) -> CacheResult<Option<Shipyard>> {
        Ok(self.tables.read().shipyards.get(symbol).cloned())
    }

    fn market_sells(&self, waypoint: &WaypointSymbol, good: &str) -> CacheResult<bool> {
        Ok(self
            .tables
            .read()
            .markets
            .get(waypoint)
            .is_some_and(|m| sells(m, good)))
    }

    fn markets_importing(&self, goods: &[TradeSymbol]) -> CacheResult<Vec<WaypointSymbol>> {
        let t = self.tables.read();
        let mut ranked: Vec<(usize, &WaypointSymbol)> = t
            .markets
            .values()
            .map(|m| (goods.iter().filter(|g| m.buys(g)).count(), &m.symbol))
            .filter(|(n, _)| *n > 0)
            .collect();
        // Most goods first; BTreeMap order breaks ties by symbol.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(ranked.into_iter().map(|(_, wp)| wp.clone()).collect())
    }

    fn export_waypoints_for_good(&self, good: &str) -> CacheResult<Vec<WaypointSymbol>> {
        let t = self.tables.read();
        let mut asks: Vec<(u32, &WaypointSymbol)> = t
            .markets
            .values()
            .filter(|m| sells(m, good))
            .map(|m| (m.trade_good(good).map_or(u32::MAX, |g| g.purchase_price), &m.symbol))
            .collect();
        asks.sort_by_key(|(ask, _)| *ask);
        Ok(asks.into_iter().map(|(_, wp)| wp.clone()).collect())
    }

    fn market_trades(&self, min_gross: i64) -> CacheResult<Vec<MarketTrade>> {
        let t = self.tables.read();
        let mut trades = Vec::new();
        for source in t.markets.values() {
            for offer in source
                .trade_goods
                .iter()
                .filter(|g| matches!(g.kind, TradeKind::Export | TradeKind::Exchange))
            {
                for buyer in t.markets.values().filter(|m| m.symbol != source.symbol) {
                    let Some(bid) = buyer
                        .trade_good(&offer.symbol)
                        .filter(|g| matches!(g.kind, TradeKind::Import | TradeKind::Exchange))
                    else {
                        continue;
                    };
                    let trade = MarketTrade {
                        good:       offer.symbol.clone(),
                        source:     source.symbol.clone(),
                        buyer:      buyer.symbol.clone(),
                        buy_price:  offer.purchase_price,
                        sell_price: bid.sell_price,
                        volume:     offer.trade_volume.min(bid.trade_volume),
                    };
                    if trade.gross() > min_gross {
                        trades.push(trade);
                    }
                }
            }
        }
        trades.sort_by(|a, b| b.gross().cmp(&a.gross()));
        Ok(trades)
    }

    fn fleet(&self) -> CacheResult<Vec<ShipSnapshot>> {
        Ok(self.tables.read().fleet.values().cloned().collect())
    }

    fn contracts(&self) -> CacheResult<Vec<ContractData>> {
        Ok(self.tables.read().contracts.values().cloned().collect())
    }

    fn upsert_market(&self, market: &Market) -> CacheResult<()> {
        self.tables.write().markets.insert(market.symbol.clone(), market.clone());
        Ok(())
    }

    fn upsert_shipyard(&self, shipyard: &Shipyard) -> CacheResult<()> {
        self.tables.write().shipyards.insert(shipyard.symbol.clone(), shipyard.clone());
        Ok(())
    }

    fn upsert_waypoints(&self, waypoints: &[Waypoint]) -> CacheResult<()> {
        let mut t = self.tables.write();
        for wp in waypoints {
            t.waypoints.insert(wp.symbol.clone(), wp.clone());
        }
        Ok(())
    }

    fn upsert_fleet(&self, ships: &[ShipSnapshot]) -> CacheResult<()> {
        let mut t = self.tables.write();
        for ship in ships {
            t.fleet.insert(ship.symbol.clone(), ship.clone());
        }
        Ok(())
    }

    fn upsert_contracts(&self, contracts: &[ContractData]) -> CacheResult<()> {
        let mut t = self.tables.write();
        for c in contracts {
            t.contracts.insert(c.id.clone(), c.clone());
        }
        Ok(())
    }
}

/// `true` if a ship can buy `good` at `m`.
fn sells(m: &Market, good: &str) -> bool {
    m.exports.iter().chain(&m.exchange).any(|g| g == good)
        || m
            .trade_good(good)
            .is_some_and(|g| matches!(g.kind, TradeKind::Export | TradeKind::Exchange))
}
