//! `Ship` — one independently controlled agent.
//!
//! # State mirroring
//!
//! The ship keeps a mirror of its remote state (`nav`, `fuel`, `cargo`,
//! `cooldown`) behind a `parking_lot::RwLock`.  Every remote response carries
//! the updated sub-resource and replaces the matching field wholesale; the
//! ship never merges or predicts.  The lock is only held for those copies
//! and for synchronous queries, never across an `.await`.
//!
//! # Cross-ship access
//!
//! Ships never touch each other's mirror except in one place: a cargo
//! transfer, where the receiver updates its own hold and the sender's hold
//! is replaced from the response.  The receiver serialises concurrent
//! transfers with its `transfer_guard`.

use std::fmt;
use std::sync::{Arc, Weak};

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{debug, info};

use st_api::{
    ApiClient, Cargo, ContractData, ExtractionYield, Fuel, Market, Nav, NavStatus, ShipSnapshot,
    Shipyard, Survey, TradeKind,
};
use st_cache::MarketCache;
use st_core::{FlightMode, ShipSymbol, SystemSymbol, Timestamp, TradeSymbol, WaypointSymbol};

use crate::ShipResult;
use crate::mission::Mission;

pub struct Ship {
    symbol:         ShipSymbol,
    client:         Arc<dyn ApiClient>,
    state:          RwLock<ShipSnapshot>,
    transfer_guard: tokio::sync::Mutex<()>,
    mission:        RwLock<Option<Weak<dyn Mission>>>,
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ship")
            .field("symbol", &self.symbol)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl Ship {
    pub fn new(snapshot: ShipSnapshot, client: Arc<dyn ApiClient>) -> Self {
        Self {
            symbol:         snapshot.symbol.clone(),
            client,
            state:          RwLock::new(snapshot),
            transfer_guard: tokio::sync::Mutex::new(()),
            mission:        RwLock::new(None),
        }
    }

    #[inline]
    pub fn symbol(&self) -> &ShipSymbol {
        &self.symbol
    }

    // ── Mission slot ──────────────────────────────────────────────────────

    /// The mission currently driving this ship, if it is still alive.
    pub fn mission(&self) -> Option<Arc<dyn Mission>> {
        self.mission.read().as_ref().and_then(Weak::upgrade)
    }

    pub fn set_mission(&self, mission: Weak<dyn Mission>) {
        *self.mission.write() = Some(mission);
    }

    pub fn clear_mission(&self) {
        *self.mission.write() = None;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// A copy of the whole mirror.
    pub fn snapshot(&self) -> ShipSnapshot {
        self.state.read().clone()
    }

    pub fn nav(&self) -> Nav {
        self.state.read().nav.clone()
    }

    pub fn fuel(&self) -> Fuel {
        self.state.read().fuel
    }

    pub fn cargo(&self) -> Cargo {
        self.state.read().cargo.clone()
    }

    /// Current waypoint, or the destination while in transit.
    pub fn at(&self) -> WaypointSymbol {
        self.state.read().nav.waypoint_symbol.clone()
    }

    pub fn is_at(&self, waypoint: &str) -> bool {
        self.state.read().nav.waypoint_symbol == waypoint
    }

    pub fn system(&self) -> SystemSymbol {
        self.state.read().nav.system_symbol.clone()
    }

    pub fn flight_mode(&self) -> FlightMode {
        self.state.read().nav.flight_mode
    }

    pub fn arrival(&self) -> Timestamp {
        self.state.read().nav.route.arrival
    }

    /// Where the current (or last) flight is headed.
    pub fn route_destination(&self) -> WaypointSymbol {
        self.state.read().nav.route.destination.clone()
    }

    /// In transit with an arrival still in the future.
    pub fn in_transit(&self) -> bool {
        self.in_transit_at(Utc::now())
    }

    pub fn in_transit_at(&self, now: Timestamp) -> bool {
        let s = self.state.read();
        s.nav.status == NavStatus::InTransit && s.nav.route.arrival > now
    }

    pub fn arrived(&self) -> bool {
        !self.in_transit()
    }

    pub fn is_docked(&self) -> bool {
        self.state.read().nav.status == NavStatus::Docked
    }

    pub fn free_capacity(&self) -> u32 {
        self.state.read().cargo.free()
    }

    pub fn units_of(&self, good: &str) -> u32 {
        self.state.read().cargo.units_of(good)
    }

    pub fn has_good(&self, good: &str) -> bool {
        self.units_of(good) > 0
    }

    pub fn is_cargo_full(&self) -> bool {
        self.state.read().cargo.is_full()
    }

    pub fn is_cargo_empty(&self) -> bool {
        self.state.read().cargo.is_empty()
    }

    /// Held goods in hold order.
    pub fn inventory_symbols(&self) -> Vec<TradeSymbol> {
        self.state.read().cargo.inventory.iter().map(|i| i.symbol.clone()).collect()
    }

    pub fn in_cooldown(&self) -> bool {
        self.in_cooldown_at(Utc::now())
    }

    pub fn in_cooldown_at(&self, now: Timestamp) -> bool {
        let s = self.state.read();
        match s.cooldown.expiration {
            Some(exp) => exp > now,
            None => s.cooldown.remaining_seconds > 0,
        }
    }

    pub fn cooldown_expiration(&self) -> Option<Timestamp> {
        self.state.read().cooldown.expiration
    }

    /// Tank full, or a ship that burns no fuel.
    pub fn is_fuel_full(&self) -> bool {
        self.state.read().fuel.missing() == 0
    }

    // ── Mirror updates ────────────────────────────────────────────────────

    fn set_nav(&self, nav: Nav) {
        self.state.write().nav = nav;
    }

    fn set_fuel(&self, fuel: Fuel) {
        self.state.write().fuel = fuel;
    }

    fn set_cargo(&self, cargo: Cargo) {
        self.state.write().cargo = cargo;
    }

    // ── Navigation ────────────────────────────────────────────────────────

    /// Re-read the whole ship from the API.
    pub async fn refresh(&self) -> ShipResult<()> {
        let snapshot = self.client.get_ship(&self.symbol).await?;
        *self.state.write() = snapshot;
        Ok(())
    }

    pub async fn dock(&self) -> ShipResult<()> {
        if self.is_docked() {
            return Ok(());
        }
        debug!(ship = %self.symbol, "docking");
        let nav = self.client.dock(&self.symbol).await?;
        self.set_nav(nav);
        Ok(())
    }

    pub async fn orbit(&self) -> ShipResult<()> {
        if self.state.read().nav.status == NavStatus::InOrbit {
            return Ok(());
        }
        debug!(ship = %self.symbol, "entering orbit");
        let nav = self.client.orbit(&self.symbol).await?;
        self.set_nav(nav);
        Ok(())
    }

    pub async fn set_flight_mode(&self, mode: FlightMode) -> ShipResult<()> {
        if self.flight_mode() == mode {
            return Ok(());
        }
        info!(ship = %self.symbol, %mode, "changing flight mode");
        let nav = self.client.set_flight_mode(&self.symbol, mode).await?;
        self.set_nav(nav);
        Ok(())
    }

    /// Fly to `destination`, undocking first.  Returns the arrival time.
    pub async fn navigate(&self, destination: &WaypointSymbol) -> ShipResult<Timestamp> {
        if self.is_docked() {
            self.orbit().await?;
        }
        let res = self.client.navigate(&self.symbol, destination).await?;
        let arrival = res.nav.route.arrival;
        {
            let mut s = self.state.write();
            s.nav = res.nav;
            s.fuel = res.fuel;
        }
        info!(ship = %self.symbol, %destination, %arrival, "navigating");
        Ok(arrival)
    }

    /// Dock and buy exactly the missing fuel.  Returns the units bought.
    pub async fn refuel(&self) -> ShipResult<u32> {
        let missing = self.fuel().missing();
        if missing == 0 {
            return Ok(0);
        }
        self.dock().await?;
        let fuel = self.client.refuel(&self.symbol, Some(missing)).await?;
        self.set_fuel(fuel);
        info!(ship = %self.symbol, units = missing, "refuelled");
        Ok(missing)
    }

    // ── Trade ─────────────────────────────────────────────────────────────

    /// Buy `good` at the current market until the hold is full, the market
    /// stops selling, or `max_units` are bought (`0` = no limit).
    ///
    /// The market is re-read before every purchase; each purchase is capped
    /// by the market's trade volume.
    pub async fn buy(&self, good: &TradeSymbol, max_units: u32) -> ShipResult<u32> {
        self.dock().await?;
        let mut bought = 0u32;
        loop {
            let mut want = self.free_capacity();
            if max_units > 0 {
                want = want.min(max_units - bought);
            }
            if want == 0 {
                break;
            }
            let market = self.client.get_market(&self.at()).await?;
            let volume = purchase_volume(&market, good);
            if volume == 0 {
                debug!(ship = %self.symbol, %good, "market is not selling");
                break;
            }
            let units = want.min(volume);
            let cargo = self.client.purchase(&self.symbol, good, units).await?;
            self.set_cargo(cargo);
            bought += units;
        }
        if bought > 0 {
            info!(ship = %self.symbol, %good, units = bought, "bought");
        }
        Ok(bought)
    }

    /// Sell every held unit of `good` the current market will take.
    pub async fn sell(&self, good: &TradeSymbol) -> ShipResult<u32> {
        self.dock().await?;
        let mut sold = 0u32;
        loop {
            let held = self.units_of(good);
            if held == 0 {
                break;
            }
            let market = self.client.get_market(&self.at()).await?;
            let volume = if market.buys(good) { market.trade_volume(good) } else { 0 };
            if volume == 0 {
                debug!(ship = %self.symbol, %good, "market is not buying");
                break;
            }
            let units = held.min(volume);
            let cargo = self.client.sell(&self.symbol, good, units).await?;
            self.set_cargo(cargo);
            sold += units;
        }
        if sold > 0 {
            info!(ship = %self.symbol, %good, units = sold, "sold");
        }
        Ok(sold)
    }

    /// [`sell`](Self::sell) every held good.  Goods the market does not buy
    /// stay in the hold.
    pub async fn sell_cargo(&self) -> ShipResult<u32> {
        let mut sold = 0;
        for good in self.inventory_symbols() {
            sold += self.sell(&good).await?;
        }
        Ok(sold)
    }

    /// Dump every unit of `good`.
    pub async fn jettison(&self, good: &TradeSymbol) -> ShipResult<u32> {
        let units = self.units_of(good);
        if units == 0 {
            return Ok(0);
        }
        let cargo = self.client.jettison(&self.symbol, good, units).await?;
        self.set_cargo(cargo);
        info!(ship = %self.symbol, %good, units, "jettisoned");
        Ok(units)
    }

    /// Pull up to `cap` units of `good` (`0` = no cap) from `sender`.
    ///
    /// Moves exactly `min(sender's units, own free space, cap)`.  Returns the
    /// number of units moved.
    pub async fn receive_transfer(
        &self,
        sender: &Ship,
        good:   &TradeSymbol,
        cap:    u32,
    ) -> ShipResult<u32> {
        let _guard = self.transfer_guard.lock().await;

        let mut units = sender.units_of(good).min(self.free_capacity());
        if cap > 0 {
            units = units.min(cap);
        }
        if units == 0 {
            return Ok(0);
        }
        let sender_cargo = self
            .client
            .transfer_cargo(&sender.symbol, &self.symbol, good, units)
            .await?;
        sender.set_cargo(sender_cargo);
        self.state.write().cargo.add(good, units);
        info!(from = %sender.symbol, to = %self.symbol, %good, units, "cargo transferred");
        Ok(units)
    }

    // ── Extraction ────────────────────────────────────────────────────────

    pub async fn extract(&self, survey: Option<&Survey>) -> ShipResult<ExtractionYield> {
        let res = self.client.extract(&self.symbol, survey).await?;
        {
            let mut s = self.state.write();
            s.cargo = res.cargo;
            s.cooldown = res.cooldown;
        }
        let y = res.extraction.yielded;
        info!(ship = %self.symbol, good = %y.symbol, units = y.units, "extracted");
        Ok(y)
    }

    pub async fn survey(&self) -> ShipResult<Vec<Survey>> {
        let res = self.client.survey(&self.symbol).await?;
        self.state.write().cooldown = res.cooldown;
        info!(ship = %self.symbol, count = res.surveys.len(), "surveyed");
        Ok(res.surveys)
    }

    // ── Contracts ─────────────────────────────────────────────────────────

    pub async fn deliver(
        &self,
        contract_id: &str,
        good:        &TradeSymbol,
        units:       u32,
    ) -> ShipResult<ContractData> {
        let res = self
            .client
            .deliver_contract(contract_id, &self.symbol, good, units)
            .await?;
        self.set_cargo(res.cargo);
        info!(ship = %self.symbol, contract = contract_id, %good, units, "delivered");
        Ok(res.contract)
    }

    pub async fn accept_contract(&self, contract_id: &str) -> ShipResult<ContractData> {
        let data = self.client.accept_contract(contract_id).await?;
        info!(ship = %self.symbol, contract = contract_id, "contract accepted");
        Ok(data)
    }

    pub async fn negotiate_contract(&self) -> ShipResult<ContractData> {
        let data = self.client.negotiate_contract(&self.symbol).await?;
        info!(ship = %self.symbol, contract = %data.id, "contract negotiated");
        Ok(data)
    }

    pub async fn fulfill_contract(&self, contract_id: &str) -> ShipResult<ContractData> {
        let data = self.client.fulfill_contract(contract_id).await?;
        info!(ship = %self.symbol, contract = contract_id, "contract fulfilled");
        Ok(data)
    }

    // ── Market data ───────────────────────────────────────────────────────

    /// Fetch the local market and write it to `cache`.
    pub async fn scan_market(&self, cache: &dyn MarketCache) -> ShipResult<Market> {
        let market = self.client.get_market(&self.at()).await?;
        cache.upsert_market(&market)?;
        debug!(ship = %self.symbol, market = %market.symbol, goods = market.trade_goods.len(), "market scanned");
        Ok(market)
    }

    pub async fn scan_shipyard(&self, cache: &dyn MarketCache) -> ShipResult<Shipyard> {
        let shipyard = self.client.get_shipyard(&self.at()).await?;
        cache.upsert_shipyard(&shipyard)?;
        debug!(ship = %self.symbol, shipyard = %shipyard.symbol, types = shipyard.ship_types.len(), "shipyard scanned");
        Ok(shipyard)
    }
}

/// Units of `good` the market will sell per transaction (0 if it does not).
fn purchase_volume(market: &Market, good: &str) -> u32 {
    match market.trade_good(good) {
        Some(g) if matches!(g.kind, TradeKind::Export | TradeKind::Exchange) => g.trade_volume,
        _ => 0,
    }
}
