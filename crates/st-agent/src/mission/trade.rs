//! Buy low at one market, sell high at another.
//!
//! Each trader keeps its own [`TradeIntent`] between passes, keyed by ship
//! symbol.  A trader with no intent picks the best cached trade; once the
//! good is sold out of the hold the intent is dropped and the next pass
//! picks again.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use st_behavior::{Node, invert, selector, sequence};
use st_core::ShipSymbol;

use crate::leaves::*;
use crate::mission::{Mission, Role, Roster};
use crate::{Blackboard, Services, TradeIntent};

pub struct TradeMission {
    services: Services,
    roster:   Roster,
    intents:  Mutex<FxHashMap<ShipSymbol, TradeIntent>>,
}

impl TradeMission {
    pub fn new(services: Services) -> Self {
        let roster = Roster::new().with_behavior(Role::Trader, trade_tree());
        Self { services, roster, intents: Mutex::new(FxHashMap::default()) }
    }

    pub fn intent(&self, ship: &ShipSymbol) -> Option<TradeIntent> {
        self.intents.lock().get(ship).cloned()
    }
}

impl Mission for TradeMission {
    fn name(&self) -> &str {
        "trade"
    }

    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn services(&self) -> &Services {
        &self.services
    }

    fn admit(&self, _requested: Role) -> Role {
        Role::Trader
    }

    fn prepare(&self, bb: &mut Blackboard) {
        let Some(intent) = self.intent(bb.ship.symbol()) else {
            return;
        };
        bb.purchase_good = Some(intent.good.clone());
        bb.purchase_max_units = bb.config.trade.max_units_per_trade;
        bb.trade = Some(intent);
    }

    fn conclude(&self, bb: &mut Blackboard) {
        let mut intents = self.intents.lock();
        match bb.trade.take() {
            Some(intent) => intents.insert(bb.ship.symbol().clone(), intent),
            None => intents.remove(bb.ship.symbol()),
        };
    }
}

/// ```text
/// Selector
/// ├── Sequence(!HasTrade, HasCargo, SetDestinationToBestMarketToSellCargo, navigation, Dock, SellCargo)
/// ├── Sequence(HasTrade, HasCargo, SetDestinationToTradeBuyer, navigation, Dock, SellCargo)
/// └── Sequence(Selector(HasTrade, SetTradeFromBestMarketTrade),
///              SetDestinationToTradeSource, navigation, Dock, Buy)
/// ```
pub fn trade_tree() -> Node<Blackboard> {
    selector(vec![
        sequence(vec![
            invert(leaf(HasTrade)),
            leaf(HasCargo),
            leaf(SetDestinationToBestMarketToSellCargo),
            navigation(),
            leaf(Dock),
            leaf(SellCargo),
        ]),
        sequence(vec![
            leaf(HasTrade),
            leaf(HasCargo),
            leaf(SetDestinationToTradeBuyer),
            navigation(),
            leaf(Dock),
            leaf(SellCargo),
        ]),
        sequence(vec![
            selector(vec![leaf(HasTrade), leaf(SetTradeFromBestMarketTrade)]),
            leaf(SetDestinationToTradeSource),
            navigation(),
            leaf(Dock),
            leaf(Buy),
        ]),
    ])
}
