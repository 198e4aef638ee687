//! Market leaves.

use async_trait::async_trait;
use tracing::{debug, info};

use st_api::{MARKETPLACE, SHIPYARD};
use st_behavior::Status;
use st_core::TradeSymbol;

use super::Leaf;
use crate::Blackboard;
use crate::error::{LeafError, LeafResult};

/// Buy `purchase_good` here, up to `purchase_max_units`.
///
/// `Failure` when nothing was bought and the hold has none of the good.
pub struct Buy;

#[async_trait]
impl Leaf for Buy {
    const NAME: &'static str = "Buy";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let good = bb.require_purchase_good()?.clone();
        let bought = bb.ship.buy(&good, bb.purchase_max_units).await?;
        if bought == 0 && !bb.ship.has_good(&good) {
            return Err(LeafError::precondition(format!("could not buy any {good}")));
        }
        Ok(Status::Success)
    }
}

/// Sell one fixed good.
pub struct Sell(pub TradeSymbol);

#[async_trait]
impl Leaf for Sell {
    const NAME: &'static str = "Sell";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.ship.sell(&self.0).await?;
        Ok(Status::Success)
    }
}

/// Sell everything the local market buys.  A trade whose good has left the
/// hold is cleared.
pub struct SellCargo;

#[async_trait]
impl Leaf for SellCargo {
    const NAME: &'static str = "SellCargo";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.ship.sell_cargo().await?;
        if bb.trade.as_ref().is_some_and(|t| !bb.ship.has_good(&t.good)) {
            info!("trade complete");
            bb.trade = None;
        }
        Ok(Status::Success)
    }
}

/// Sell every held good the contract does not ask for.
pub struct SellNonContractCargo;

#[async_trait]
impl Leaf for SellNonContractCargo {
    const NAME: &'static str = "SellNonContractCargo";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let stray: Vec<TradeSymbol> = {
            let contract = bb.require_contract()?;
            bb.ship.inventory_symbols().into_iter().filter(|g| !contract.requires(g)).collect()
        };
        for good in &stray {
            bb.ship.sell(good).await?;
        }
        Ok(Status::Success)
    }
}

/// Dump goods no known market imports, plus the configured always-jettison
/// list.
pub struct JettisonNonSellableCargo;

#[async_trait]
impl Leaf for JettisonNonSellableCargo {
    const NAME: &'static str = "JettisonNonSellableCargo";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        for good in bb.ship.inventory_symbols() {
            let forced = bb.config.extraction.jettison_always.iter().any(|g| good == g.as_str());
            if forced || bb.cache.markets_importing(std::slice::from_ref(&good))?.is_empty() {
                bb.ship.jettison(&good).await?;
            }
        }
        Ok(Status::Success)
    }
}

/// Refresh the cached market at the current waypoint.
pub struct ScanMarket;

#[async_trait]
impl Leaf for ScanMarket {
    const NAME: &'static str = "ScanMarket";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let at = bb.ship.at();
        if !bb.cache.waypoint_has_trait(&at, MARKETPLACE)? {
            return Err(LeafError::precondition(format!("{at} has no marketplace")));
        }
        let market = bb.ship.scan_market(bb.cache.as_ref()).await?;
        debug!(market = %market.symbol, "scanned");
        Ok(Status::Success)
    }
}

/// Refresh the cached shipyard at the current waypoint.  `Failure` without a
/// remote call where there is none.
pub struct ScanShipyard;

#[async_trait]
impl Leaf for ScanShipyard {
    const NAME: &'static str = "ScanShipyard";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let at = bb.ship.at();
        if !bb.cache.waypoint_has_trait(&at, SHIPYARD)? {
            return Ok(Status::Failure);
        }
        bb.ship.scan_shipyard(bb.cache.as_ref()).await?;
        Ok(Status::Success)
    }
}
