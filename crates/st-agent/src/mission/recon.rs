//! Tour a system's markets and keep the cache fresh.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use st_api::MARKETPLACE;
use st_behavior::{Node, always_succeed, sequence};
use st_cache::CacheResult;
use st_core::{ShipSymbol, SystemSymbol, WaypointSymbol};

use crate::leaves::*;
use crate::mission::{Mission, Role, Roster};
use crate::{Blackboard, Services};

/// Every satellite walks the market list on its own cursor, wrapping
/// around at the end.  The cursor only moves after a scan completes.
pub struct MarketReconMission {
    services: Services,
    roster:   Roster,
    markets:  Vec<WaypointSymbol>,
    cursors:  Mutex<FxHashMap<ShipSymbol, usize>>,
}

impl MarketReconMission {
    pub fn new(services: Services, markets: Vec<WaypointSymbol>) -> Self {
        let roster = Roster::new().with_behavior(Role::Satellite, recon_tree());
        Self { services, roster, markets, cursors: Mutex::new(FxHashMap::default()) }
    }

    /// Every cached marketplace in `system`.
    pub fn for_system(services: Services, system: &SystemSymbol) -> CacheResult<Self> {
        let markets = services
            .cache
            .system_waypoints(system)?
            .into_iter()
            .filter(|wp| wp.has_trait(MARKETPLACE))
            .map(|wp| wp.symbol)
            .collect();
        Ok(Self::new(services, markets))
    }

    pub fn markets(&self) -> &[WaypointSymbol] {
        &self.markets
    }

    /// The market `ship` is currently headed for.
    pub fn target(&self, ship: &ShipSymbol) -> Option<&WaypointSymbol> {
        if self.markets.is_empty() {
            return None;
        }
        let cursor = self.cursors.lock().get(ship).copied().unwrap_or(0);
        self.markets.get(cursor % self.markets.len())
    }
}

impl Mission for MarketReconMission {
    fn name(&self) -> &str {
        "market-recon"
    }

    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn services(&self) -> &Services {
        &self.services
    }

    fn admit(&self, _requested: Role) -> Role {
        Role::Satellite
    }

    fn prepare(&self, bb: &mut Blackboard) {
        bb.destination = self.target(bb.ship.symbol()).cloned();
    }

    fn conclude(&self, bb: &mut Blackboard) {
        if !bb.complete || self.markets.is_empty() {
            return;
        }
        let mut cursors = self.cursors.lock();
        let cursor = cursors.entry(bb.ship.symbol().clone()).or_insert(0);
        *cursor = (*cursor + 1) % self.markets.len();
        debug!(next = %self.markets[*cursor], "market scanned");
    }
}

/// `Sequence(navigation, ScanMarket, AlwaysSucceed(ScanShipyard), MarkComplete)`
pub fn recon_tree() -> Node<Blackboard> {
    sequence(vec![
        navigation(),
        leaf(ScanMarket),
        always_succeed(leaf(ScanShipyard)),
        leaf(MarkComplete),
    ])
}
