//! In-memory stand-in for the remote game API.
//!
//! `SimulatedClient` keeps a tiny world (ships, waypoints, markets, contracts)
//! behind one lock and answers every [`ApiClient`] call against it with the
//! same preconditions the real API enforces: dock before trading, orbit
//! before navigating, enough fuel for the hop, and so on.  Travel takes wall
//! time (`travel_secs_per_unit × distance`); tests skip ahead with
//! [`SimulatedClient::finish_transits`].
//!
//! Every call is appended to a log so tests can assert which remote
//! mutations a behavior issued, and [`SimulatedClient::fail_next`] injects
//! errors.

use std::collections::{BTreeMap, HashMap, VecDeque};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;

use st_core::{
    FlightMode, ShipSymbol, SystemSymbol, Timestamp, TradeSymbol, WaypointSymbol,
};

use crate::model::{
    Cargo, ContractData, Cooldown, DeliverResult, Extraction, ExtractionYield, ExtractResult,
    Fuel, MARKETPLACE, Market, Nav, NavRoute, NavStatus, NavigateResult, ShipSnapshot, Shipyard,
    Survey, SurveyResult, System, TradeGood, TradeKind, Waypoint,
};
use crate::{ApiClient, ApiError, ApiResult};

// ── Call log ──────────────────────────────────────────────────────────────────

/// One recorded remote call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiCall {
    /// Operation name, e.g. `"navigate"`.
    pub op:     &'static str,
    /// Primary subject: ship symbol, contract id, or waypoint.
    pub target: String,
}

// ── World ─────────────────────────────────────────────────────────────────────

struct World {
    ships:        BTreeMap<ShipSymbol, ShipSnapshot>,
    waypoints:    BTreeMap<WaypointSymbol, Waypoint>,
    systems:      BTreeMap<SystemSymbol, System>,
    markets:      HashMap<WaypointSymbol, Market>,
    shipyards:    HashMap<WaypointSymbol, Shipyard>,
    contracts:    BTreeMap<String, ContractData>,
    offers:       VecDeque<ContractData>,
    yields:       HashMap<WaypointSymbol, ExtractionYield>,
    calls:        Vec<ApiCall>,
    failures:     VecDeque<ApiError>,
    travel_secs_per_unit: f64,
    cooldown_secs:        u32,
    survey_seq:           u64,
}

impl World {
    fn ship_mut(&mut self, ship: &ShipSymbol) -> ApiResult<&mut ShipSnapshot> {
        self.ships.get_mut(ship).ok_or_else(|| ApiError::NotFound {
            kind:   "ship",
            symbol: ship.to_string(),
        })
    }

    fn contract_mut(&mut self, id: &str) -> ApiResult<&mut ContractData> {
        self.contracts.get_mut(id).ok_or_else(|| ApiError::NotFound {
            kind:   "contract",
            symbol: id.to_owned(),
        })
    }

    fn market(&self, waypoint: &WaypointSymbol) -> ApiResult<&Market> {
        self.markets.get(waypoint).ok_or_else(|| ApiError::NotFound {
            kind:   "market",
            symbol: waypoint.to_string(),
        })
    }

    /// Record the call and pop an injected failure, if any.
    fn begin(&mut self, op: &'static str, target: impl ToString) -> ApiResult<()> {
        self.calls.push(ApiCall { op, target: target.to_string() });
        match self.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Land every ship whose arrival time has passed.
    fn settle(&mut self, now: Timestamp) {
        for ship in self.ships.values_mut() {
            settle_ship(ship, now);
        }
    }
}

fn settle_ship(ship: &mut ShipSnapshot, now: Timestamp) {
    if ship.nav.status == NavStatus::InTransit && ship.nav.route.arrival <= now {
        ship.nav.status = NavStatus::InOrbit;
    }
    if let Some(exp) = ship.cooldown.expiration {
        let left = (exp - now).num_seconds().max(0) as u32;
        ship.cooldown.remaining_seconds = left;
    }
}

fn require_status(ship: &ShipSnapshot, wanted: NavStatus, what: &str) -> ApiResult<()> {
    if ship.nav.status == wanted {
        return Ok(());
    }
    Err(ApiError::rejected(
        4236,
        format!("ship {} must be {wanted:?} to {what} (is {:?})", ship.symbol, ship.nav.status),
    ))
}

fn require_not_in_transit(ship: &ShipSnapshot) -> ApiResult<()> {
    if ship.nav.status == NavStatus::InTransit {
        return Err(ApiError::rejected(4214, format!("ship {} is in transit", ship.symbol)));
    }
    Ok(())
}

fn require_no_cooldown(ship: &ShipSnapshot) -> ApiResult<()> {
    if ship.cooldown.remaining_seconds > 0 {
        return Err(ApiError::rejected(
            4000,
            format!("ship {} is cooling down for {} s", ship.symbol, ship.cooldown.remaining_seconds),
        ));
    }
    Ok(())
}

// ── SimulatedClient ───────────────────────────────────────────────────────────

pub struct SimulatedClient {
    world: Mutex<World>,
}

impl Default for SimulatedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedClient {
    pub fn new() -> Self {
        Self {
            world: Mutex::new(World {
                ships:        BTreeMap::new(),
                waypoints:    BTreeMap::new(),
                systems:      BTreeMap::new(),
                markets:      HashMap::new(),
                shipyards:    HashMap::new(),
                contracts:    BTreeMap::new(),
                offers:       VecDeque::new(),
                yields:       HashMap::new(),
                calls:        Vec::new(),
                failures:     VecDeque::new(),
                travel_secs_per_unit: 1.0,
                cooldown_secs:        70,
                survey_seq:           0,
            }),
        }
    }

    // ── World setup ───────────────────────────────────────────────────────

    pub fn with_waypoint(self, wp: Waypoint) -> Self {
        {
            let mut w = self.world.lock();
            w.systems.entry(wp.system_symbol.clone()).or_insert_with(|| System {
                symbol: wp.system_symbol.clone(),
                kind:   "RED_STAR".to_owned(),
                x:      0,
                y:      0,
            });
            w.waypoints.insert(wp.symbol.clone(), wp);
        }
        self
    }

    pub fn with_market(self, market: Market) -> Self {
        self.world.lock().markets.insert(market.symbol.clone(), market);
        self
    }

    pub fn with_shipyard(self, shipyard: Shipyard) -> Self {
        self.world.lock().shipyards.insert(shipyard.symbol.clone(), shipyard);
        self
    }

    pub fn with_ship(self, ship: ShipSnapshot) -> Self {
        self.world.lock().ships.insert(ship.symbol.clone(), ship);
        self
    }

    pub fn with_contract(self, contract: ContractData) -> Self {
        self.world.lock().contracts.insert(contract.id.clone(), contract);
        self
    }

    /// Queue a contract handed out by the next `negotiate_contract`.
    pub fn with_contract_offer(self, contract: ContractData) -> Self {
        self.world.lock().offers.push_back(contract);
        self
    }

    /// What one `extract` at `waypoint` yields.
    pub fn with_yield(self, waypoint: &str, good: &str, units: u32) -> Self {
        self.world.lock().yields.insert(
            WaypointSymbol::from(waypoint),
            ExtractionYield { symbol: TradeSymbol::from(good), units },
        );
        self
    }

    pub fn with_travel_secs_per_unit(self, secs: f64) -> Self {
        self.world.lock().travel_secs_per_unit = secs;
        self
    }

    pub fn with_cooldown_secs(self, secs: u32) -> Self {
        self.world.lock().cooldown_secs = secs;
        self
    }

    // ── Test controls ─────────────────────────────────────────────────────

    /// Make the next remote call fail with `err`.  Calls queue up FIFO.
    pub fn fail_next(&self, err: ApiError) {
        self.world.lock().failures.push_back(err);
    }

    /// Move every in-flight arrival and cooldown into the past.
    pub fn finish_transits(&self) {
        let mut w = self.world.lock();
        let past = Utc::now() - Duration::seconds(1);
        for ship in w.ships.values_mut() {
            if ship.nav.status == NavStatus::InTransit {
                ship.nav.route.arrival = past;
            }
            if ship.cooldown.expiration.is_some() {
                ship.cooldown.expiration = Some(past);
            }
        }
        w.settle(Utc::now());
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.world.lock().calls.clone()
    }

    /// Number of recorded calls named `op`.
    pub fn count(&self, op: &str) -> usize {
        self.world.lock().calls.iter().filter(|c| c.op == op).count()
    }

    pub fn ship(&self, symbol: &str) -> Option<ShipSnapshot> {
        self.world.lock().ships.get(symbol).cloned()
    }

    pub fn contract(&self, id: &str) -> Option<ContractData> {
        self.world.lock().contracts.get(id).cloned()
    }

    /// Overwrite one ship's remote state.
    pub fn set_ship(&self, ship: ShipSnapshot) {
        self.world.lock().ships.insert(ship.symbol.clone(), ship);
    }
}

// ── ApiClient impl ────────────────────────────────────────────────────────────

#[async_trait]
impl ApiClient for SimulatedClient {
    async fn get_ship(&self, ship: &ShipSymbol) -> ApiResult<ShipSnapshot> {
        let mut w = self.world.lock();
        w.begin("get_ship", ship)?;
        w.settle(Utc::now());
        Ok(w.ship_mut(ship)?.clone())
    }

    async fn list_ships(&self) -> ApiResult<Vec<ShipSnapshot>> {
        let mut w = self.world.lock();
        w.begin("list_ships", "")?;
        w.settle(Utc::now());
        Ok(w.ships.values().cloned().collect())
    }

    async fn dock(&self, ship: &ShipSymbol) -> ApiResult<Nav> {
        let mut w = self.world.lock();
        w.begin("dock", ship)?;
        let s = w.ship_mut(ship)?;
        settle_ship(s, Utc::now());
        require_not_in_transit(s)?;
        s.nav.status = NavStatus::Docked;
        Ok(s.nav.clone())
    }

    async fn orbit(&self, ship: &ShipSymbol) -> ApiResult<Nav> {
        let mut w = self.world.lock();
        w.begin("orbit", ship)?;
        let s = w.ship_mut(ship)?;
        settle_ship(s, Utc::now());
        require_not_in_transit(s)?;
        s.nav.status = NavStatus::InOrbit;
        Ok(s.nav.clone())
    }

    async fn navigate(
        &self,
        ship:        &ShipSymbol,
        destination: &WaypointSymbol,
    ) -> ApiResult<NavigateResult> {
        let mut w = self.world.lock();
        w.begin("navigate", ship)?;
        let now = Utc::now();
        let secs_per_unit = w.travel_secs_per_unit;

        let dest = w.waypoints.get(destination).cloned().ok_or_else(|| ApiError::NotFound {
            kind:   "waypoint",
            symbol: destination.to_string(),
        })?;
        let origin_wp = {
            let s = w.ship_mut(ship)?;
            settle_ship(s, now);
            require_status(s, NavStatus::InOrbit, "navigate")?;
            s.nav.waypoint_symbol.clone()
        };
        if &origin_wp == destination {
            return Err(ApiError::rejected(4204, format!("ship is already at {destination}")));
        }
        let origin = w.waypoints.get(&origin_wp).cloned().ok_or_else(|| ApiError::NotFound {
            kind:   "waypoint",
            symbol: origin_wp.to_string(),
        })?;
        if origin.system_symbol != dest.system_symbol {
            return Err(ApiError::rejected(4202, "destination is in another system"));
        }

        let s = w.ship_mut(ship)?;
        let distance = origin.coord().distance(dest.coord());
        let fuel = s.nav.flight_mode.fuel_cost(distance);
        if s.fuel.capacity > 0 {
            if s.fuel.current < fuel {
                return Err(ApiError::rejected(
                    4203,
                    format!("insufficient fuel: need {fuel}, have {}", s.fuel.current),
                ));
            }
            s.fuel.current -= fuel;
        }

        let mut secs = f64::from(distance.max(1)) * secs_per_unit;
        if s.nav.flight_mode == FlightMode::Drift {
            secs *= 10.0;
        }
        s.nav.route = NavRoute {
            origin:         origin_wp,
            destination:    destination.clone(),
            departure_time: now,
            arrival:        now + Duration::milliseconds((secs * 1000.0) as i64),
        };
        s.nav.waypoint_symbol = destination.clone();
        s.nav.status = NavStatus::InTransit;
        settle_ship(s, now);

        Ok(NavigateResult { nav: s.nav.clone(), fuel: s.fuel })
    }

    async fn set_flight_mode(&self, ship: &ShipSymbol, mode: FlightMode) -> ApiResult<Nav> {
        let mut w = self.world.lock();
        w.begin("set_flight_mode", ship)?;
        let s = w.ship_mut(ship)?;
        s.nav.flight_mode = mode;
        Ok(s.nav.clone())
    }

    async fn refuel(&self, ship: &ShipSymbol, units: Option<u32>) -> ApiResult<Fuel> {
        let mut w = self.world.lock();
        w.begin("refuel", ship)?;
        let wp = w.ship_mut(ship)?.nav.waypoint_symbol.clone();
        let sells_fuel = w.waypoints.get(&wp).is_some_and(|x| x.has_trait(MARKETPLACE));
        if !sells_fuel {
            return Err(ApiError::rejected(4600, format!("no fuel for sale at {wp}")));
        }
        let s = w.ship_mut(ship)?;
        require_status(s, NavStatus::Docked, "refuel")?;
        let add = units.unwrap_or(s.fuel.missing()).min(s.fuel.missing());
        s.fuel.current += add;
        Ok(s.fuel)
    }

    async fn purchase(&self, ship: &ShipSymbol, good: &TradeSymbol, units: u32) -> ApiResult<Cargo> {
        let mut w = self.world.lock();
        w.begin("purchase", ship)?;
        let wp = w.ship_mut(ship)?.nav.waypoint_symbol.clone();
        let volume = match w.market(&wp)?.trade_good(good) {
            Some(g) if matches!(g.kind, TradeKind::Export | TradeKind::Exchange) => g.trade_volume,
            _ => return Err(ApiError::rejected(4601, format!("{good} is not sold at {wp}"))),
        };
        if units > volume {
            return Err(ApiError::rejected(4604, format!("{units} exceeds trade volume {volume}")));
        }
        let s = w.ship_mut(ship)?;
        require_status(s, NavStatus::Docked, "purchase")?;
        if units > s.cargo.free() {
            return Err(ApiError::rejected(4217, "not enough cargo space"));
        }
        s.cargo.add(good, units);
        Ok(s.cargo.clone())
    }

    async fn sell(&self, ship: &ShipSymbol, good: &TradeSymbol, units: u32) -> ApiResult<Cargo> {
        let mut w = self.world.lock();
        w.begin("sell", ship)?;
        let wp = w.ship_mut(ship)?.nav.waypoint_symbol.clone();
        let market = w.market(&wp)?;
        if !market.buys(good) {
            return Err(ApiError::rejected(4602, format!("{good} is not bought at {wp}")));
        }
        let volume = market.trade_volume(good);
        if units > volume {
            return Err(ApiError::rejected(4604, format!("{units} exceeds trade volume {volume}")));
        }
        let s = w.ship_mut(ship)?;
        require_status(s, NavStatus::Docked, "sell")?;
        if s.cargo.units_of(good) < units {
            return Err(ApiError::rejected(4219, format!("ship holds fewer than {units} {good}")));
        }
        s.cargo.remove(good, units);
        Ok(s.cargo.clone())
    }

    async fn jettison(&self, ship: &ShipSymbol, good: &TradeSymbol, units: u32) -> ApiResult<Cargo> {
        let mut w = self.world.lock();
        w.begin("jettison", ship)?;
        let s = w.ship_mut(ship)?;
        if s.cargo.units_of(good) < units {
            return Err(ApiError::rejected(4219, format!("ship holds fewer than {units} {good}")));
        }
        s.cargo.remove(good, units);
        Ok(s.cargo.clone())
    }

    async fn transfer_cargo(
        &self,
        from:  &ShipSymbol,
        to:    &ShipSymbol,
        good:  &TradeSymbol,
        units: u32,
    ) -> ApiResult<Cargo> {
        let mut w = self.world.lock();
        w.begin("transfer_cargo", from)?;
        let now = Utc::now();
        let (from_wp, held) = {
            let s = w.ship_mut(from)?;
            settle_ship(s, now);
            require_not_in_transit(s)?;
            (s.nav.waypoint_symbol.clone(), s.cargo.units_of(good))
        };
        let (to_wp, free) = {
            let r = w.ship_mut(to)?;
            settle_ship(r, now);
            require_not_in_transit(r)?;
            (r.nav.waypoint_symbol.clone(), r.cargo.free())
        };
        if from_wp != to_wp {
            return Err(ApiError::rejected(4220, "ships are not at the same waypoint"));
        }
        if held < units {
            return Err(ApiError::rejected(4219, format!("sender holds fewer than {units} {good}")));
        }
        if free < units {
            return Err(ApiError::rejected(4217, "receiver lacks cargo space"));
        }
        w.ship_mut(to)?.cargo.add(good, units);
        let s = w.ship_mut(from)?;
        s.cargo.remove(good, units);
        Ok(s.cargo.clone())
    }

    async fn extract(&self, ship: &ShipSymbol, survey: Option<&Survey>) -> ApiResult<ExtractResult> {
        let mut w = self.world.lock();
        w.begin("extract", ship)?;
        let now = Utc::now();
        let cooldown_secs = w.cooldown_secs;
        let wp = {
            let s = w.ship_mut(ship)?;
            settle_ship(s, now);
            require_status(s, NavStatus::InOrbit, "extract")?;
            require_no_cooldown(s)?;
            s.nav.waypoint_symbol.clone()
        };
        let mut yielded = w.yields.get(&wp).cloned().ok_or_else(|| {
            ApiError::rejected(4205, format!("nothing to extract at {wp}"))
        })?;
        if let Some(first) = survey.and_then(|s| s.deposits.first()) {
            yielded.symbol = first.clone();
        }

        let s = w.ship_mut(ship)?;
        if s.cargo.is_full() {
            return Err(ApiError::rejected(4228, "cargo hold is full"));
        }
        yielded.units = yielded.units.min(s.cargo.free());
        s.cargo.add(&yielded.symbol, yielded.units);
        s.cooldown = Cooldown {
            total_seconds:     cooldown_secs,
            remaining_seconds: cooldown_secs,
            expiration:        Some(now + Duration::seconds(i64::from(cooldown_secs))),
        };
        Ok(ExtractResult {
            extraction: Extraction { ship_symbol: ship.clone(), yielded },
            cargo:      s.cargo.clone(),
            cooldown:   s.cooldown.clone(),
        })
    }

    async fn survey(&self, ship: &ShipSymbol) -> ApiResult<SurveyResult> {
        let mut w = self.world.lock();
        w.begin("survey", ship)?;
        let now = Utc::now();
        let cooldown_secs = w.cooldown_secs;
        let wp = {
            let s = w.ship_mut(ship)?;
            settle_ship(s, now);
            require_status(s, NavStatus::InOrbit, "survey")?;
            require_no_cooldown(s)?;
            s.nav.waypoint_symbol.clone()
        };
        let deposit = w.yields.get(&wp).map(|y| y.symbol.clone()).ok_or_else(|| {
            ApiError::rejected(4205, format!("nothing to survey at {wp}"))
        })?;
        w.survey_seq += 1;
        let survey = Survey {
            signature:  format!("{wp}-{:04}", w.survey_seq),
            symbol:     wp,
            deposits:   vec![deposit],
            expiration: now + Duration::minutes(15),
            size:       "MODERATE".to_owned(),
        };
        let s = w.ship_mut(ship)?;
        s.cooldown = Cooldown {
            total_seconds:     cooldown_secs,
            remaining_seconds: cooldown_secs,
            expiration:        Some(now + Duration::seconds(i64::from(cooldown_secs))),
        };
        Ok(SurveyResult { surveys: vec![survey], cooldown: s.cooldown.clone() })
    }

    async fn list_contracts(&self) -> ApiResult<Vec<ContractData>> {
        let mut w = self.world.lock();
        w.begin("list_contracts", "")?;
        Ok(w.contracts.values().cloned().collect())
    }

    async fn accept_contract(&self, contract_id: &str) -> ApiResult<ContractData> {
        let mut w = self.world.lock();
        w.begin("accept_contract", contract_id)?;
        let c = w.contract_mut(contract_id)?;
        if c.accepted {
            return Err(ApiError::rejected(4501, "contract already accepted"));
        }
        c.accepted = true;
        Ok(c.clone())
    }

    async fn negotiate_contract(&self, ship: &ShipSymbol) -> ApiResult<ContractData> {
        let mut w = self.world.lock();
        w.begin("negotiate_contract", ship)?;
        let s = w.ship_mut(ship)?;
        require_status(s, NavStatus::Docked, "negotiate a contract")?;
        let offer = w
            .offers
            .pop_front()
            .ok_or_else(|| ApiError::rejected(4511, "no contracts on offer"))?;
        w.contracts.insert(offer.id.clone(), offer.clone());
        Ok(offer)
    }

    async fn fulfill_contract(&self, contract_id: &str) -> ApiResult<ContractData> {
        let mut w = self.world.lock();
        w.begin("fulfill_contract", contract_id)?;
        let c = w.contract_mut(contract_id)?;
        if !c.accepted {
            return Err(ApiError::rejected(4502, "contract not accepted"));
        }
        if c.terms.deliver.iter().any(|d| d.remaining() > 0) {
            return Err(ApiError::rejected(4503, "contract terms not met"));
        }
        c.fulfilled = true;
        Ok(c.clone())
    }

    async fn deliver_contract(
        &self,
        contract_id: &str,
        ship:        &ShipSymbol,
        good:        &TradeSymbol,
        units:       u32,
    ) -> ApiResult<DeliverResult> {
        let mut w = self.world.lock();
        w.begin("deliver_contract", contract_id)?;
        let now = Utc::now();
        let (wp, held) = {
            let s = w.ship_mut(ship)?;
            settle_ship(s, now);
            require_status(s, NavStatus::Docked, "deliver")?;
            (s.nav.waypoint_symbol.clone(), s.cargo.units_of(good))
        };
        let c = w.contract_mut(contract_id)?;
        if !c.accepted {
            return Err(ApiError::rejected(4502, "contract not accepted"));
        }
        let term = c
            .terms
            .deliver
            .iter_mut()
            .find(|d| &d.trade_symbol == good)
            .ok_or_else(|| ApiError::rejected(4508, format!("{good} is not part of the contract")))?;
        if term.destination_symbol != wp {
            return Err(ApiError::rejected(4509, format!("deliveries go to {}", term.destination_symbol)));
        }
        if held < units {
            return Err(ApiError::rejected(4219, format!("ship holds fewer than {units} {good}")));
        }
        let delivered = units.min(term.remaining());
        term.units_fulfilled += delivered;
        let contract = c.clone();
        let s = w.ship_mut(ship)?;
        s.cargo.remove(good, delivered);
        Ok(DeliverResult { contract, cargo: s.cargo.clone() })
    }

    async fn get_market(&self, waypoint: &WaypointSymbol) -> ApiResult<Market> {
        let mut w = self.world.lock();
        w.begin("get_market", waypoint)?;
        Ok(w.market(waypoint)?.clone())
    }

    async fn get_shipyard(&self, waypoint: &WaypointSymbol) -> ApiResult<Shipyard> {
        let mut w = self.world.lock();
        w.begin("get_shipyard", waypoint)?;
        w.shipyards.get(waypoint).cloned().ok_or_else(|| ApiError::NotFound {
            kind:   "shipyard",
            symbol: waypoint.to_string(),
        })
    }

    async fn list_systems(&self) -> ApiResult<Vec<System>> {
        let mut w = self.world.lock();
        w.begin("list_systems", "")?;
        Ok(w.systems.values().cloned().collect())
    }

    async fn list_waypoints(&self, system: &SystemSymbol) -> ApiResult<Vec<Waypoint>> {
        let mut w = self.world.lock();
        w.begin("list_waypoints", system)?;
        Ok(w
            .waypoints
            .values()
            .filter(|wp| &wp.system_symbol == system)
            .cloned()
            .collect())
    }
}

// ── Fixture helpers ───────────────────────────────────────────────────────────

/// A waypoint in the system implied by its symbol.
pub fn waypoint(symbol: &str, x: i32, y: i32, traits: &[&str]) -> Waypoint {
    let symbol = WaypointSymbol::from(symbol);
    Waypoint {
        system_symbol: symbol.system(),
        symbol,
        kind:   "PLANET".to_owned(),
        x,
        y,
        traits: traits.iter().map(|t| (*t).to_owned()).collect(),
    }
}

/// An orbiting, idle ship at `at`.
pub fn ship(symbol: &str, at: &str, fuel: u32, fuel_capacity: u32, cargo_capacity: u32) -> ShipSnapshot {
    let at = WaypointSymbol::from(at);
    let now = Utc::now();
    ShipSnapshot {
        symbol: ShipSymbol::from(symbol),
        role:   "COMMAND".to_owned(),
        nav: Nav {
            system_symbol:   at.system(),
            waypoint_symbol: at.clone(),
            route: NavRoute {
                origin:         at.clone(),
                destination:    at,
                departure_time: now,
                arrival:        now,
            },
            status:      NavStatus::InOrbit,
            flight_mode: FlightMode::Cruise,
        },
        fuel:     Fuel { current: fuel, capacity: fuel_capacity },
        cargo:    Cargo { capacity: cargo_capacity, units: 0, inventory: Vec::new() },
        cooldown: Cooldown::default(),
    }
}

/// A market listing `goods` as `(symbol, kind, trade_volume, price)`.
///
/// The purchase price is `price`; the sell price is 90 % of it.
pub fn market(at: &str, goods: &[(&str, TradeKind, u32, u32)]) -> Market {
    let mut m = Market { symbol: WaypointSymbol::from(at), ..Market::default() };
    for &(good, kind, volume, price) in goods {
        let symbol = TradeSymbol::from(good);
        match kind {
            TradeKind::Export => m.exports.push(symbol.clone()),
            TradeKind::Import => m.imports.push(symbol.clone()),
            TradeKind::Exchange => m.exchange.push(symbol.clone()),
        }
        m.trade_goods.push(TradeGood {
            symbol,
            kind,
            trade_volume:   volume,
            purchase_price: price,
            sell_price:     price * 9 / 10,
        });
    }
    m
}
