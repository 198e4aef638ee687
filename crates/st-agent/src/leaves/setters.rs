//! Leaves that write planning fields onto the blackboard.
//!
//! Setters read the cache and never call the remote API.  An empty cache
//! answer is a `Failure` (there is nowhere to go), not an error.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use st_behavior::Status;
use st_core::MissingMarketPolicy;

use super::Leaf;
use crate::error::{LeafError, LeafResult};
use crate::{Blackboard, TradeIntent};

pub struct SetDestinationToExtractionWaypoint;

#[async_trait]
impl Leaf for SetDestinationToExtractionWaypoint {
    const NAME: &'static str = "SetDestinationToExtractionWaypoint";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.destination = Some(bb.require_extraction_waypoint()?.clone());
        Ok(Status::Success)
    }
}

/// The market importing the most of the held goods.
pub struct SetDestinationToBestMarketToSellCargo;

#[async_trait]
impl Leaf for SetDestinationToBestMarketToSellCargo {
    const NAME: &'static str = "SetDestinationToBestMarketToSellCargo";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let goods = bb.ship.inventory_symbols();
        if goods.is_empty() {
            return Err(LeafError::precondition("hold is empty"));
        }
        let markets = bb.cache.markets_importing(&goods)?;
        let Some(best) = markets.into_iter().next() else {
            warn!(?goods, "no market imports the held goods");
            return Ok(Status::Failure);
        };
        debug!(market = %best, "selling cargo");
        bb.destination = Some(best);
        Ok(Status::Success)
    }
}

/// Adopt the most profitable cached trade.
pub struct SetTradeFromBestMarketTrade;

#[async_trait]
impl Leaf for SetTradeFromBestMarketTrade {
    const NAME: &'static str = "SetTradeFromBestMarketTrade";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let trades = bb.cache.market_trades(bb.config.trade.min_gross_profit)?;
        let Some(best) = trades.into_iter().next() else {
            warn!("no profitable trades");
            return Ok(Status::Failure);
        };
        info!(
            good = %best.good,
            source = %best.source,
            buyer = %best.buyer,
            gross = best.gross(),
            "trade selected",
        );
        bb.purchase_good = Some(best.good.clone());
        bb.purchase_max_units = bb.config.trade.max_units_per_trade;
        bb.trade = Some(TradeIntent { source: best.source, buyer: best.buyer, good: best.good });
        Ok(Status::Success)
    }
}

pub struct SetDestinationToTradeSource;

#[async_trait]
impl Leaf for SetDestinationToTradeSource {
    const NAME: &'static str = "SetDestinationToTradeSource";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.destination = Some(bb.require_trade()?.source.clone());
        Ok(Status::Success)
    }
}

pub struct SetDestinationToTradeBuyer;

#[async_trait]
impl Leaf for SetDestinationToTradeBuyer {
    const NAME: &'static str = "SetDestinationToTradeBuyer";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.destination = Some(bb.require_trade()?.buyer.clone());
        Ok(Status::Success)
    }
}

/// Plan a purchase for the first open term: good, units still missing from
/// the hold, and the cheapest exporter as destination.
///
/// With no known exporter, [`MissingMarketPolicy`] decides between
/// `Failure` and `Running`.
pub struct SetPurchaseFromContract;

#[async_trait]
impl Leaf for SetPurchaseFromContract {
    const NAME: &'static str = "SetPurchaseFromContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let term = bb
            .require_contract()?
            .first_open_term()
            .cloned()
            .ok_or_else(|| LeafError::precondition("contract has no open terms"))?;

        let needed = term.remaining().saturating_sub(bb.ship.units_of(&term.trade_symbol));
        let good = term.trade_symbol;
        if needed == 0 {
            return Err(LeafError::precondition(format!("hold already covers {good}")));
        }
        bb.purchase_good = Some(good.clone());
        bb.purchase_max_units = needed;

        let exporters = bb.cache.export_waypoints_for_good(&good)?;
        let Some(cheapest) = exporters.into_iter().next() else {
            return match bb.config.contract.missing_market {
                MissingMarketPolicy::Fail => {
                    Err(LeafError::precondition(format!("no market sells {good}")))
                }
                MissingMarketPolicy::Retry => {
                    warn!(%good, "no market sells contract good; waiting for cache");
                    Ok(Status::Running)
                }
            };
        };
        info!(%good, units = needed, market = %cheapest, "contract purchase planned");
        bb.destination = Some(cheapest);
        Ok(Status::Success)
    }
}

pub struct SetDeliveryDestFromContract;

#[async_trait]
impl Leaf for SetDeliveryDestFromContract {
    const NAME: &'static str = "SetDeliveryDestFromContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let dest = bb
            .require_contract()?
            .first_open_term()
            .map(|d| d.destination_symbol.clone())
            .ok_or_else(|| LeafError::precondition("no contract goods left to deliver"))?;
        bb.destination = Some(dest);
        Ok(Status::Success)
    }
}
