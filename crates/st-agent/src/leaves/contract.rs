//! Contract lifecycle leaves.  Each remote response replaces the
//! blackboard's contract wholesale.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use st_behavior::Status;

use super::Leaf;
use crate::error::{LeafError, LeafResult};
use crate::{Blackboard, Contract};

/// No-op when already accepted; `Failure` once expired.
pub struct AcceptContract;

#[async_trait]
impl Leaf for AcceptContract {
    const NAME: &'static str = "AcceptContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let contract = bb.require_contract()?;
        if contract.is_accepted() {
            return Ok(Status::Success);
        }
        if contract.is_expired(Utc::now()) {
            return Err(LeafError::precondition(format!("contract {} expired", contract.id())));
        }
        let id = contract.id().to_owned();
        let data = bb.ship.accept_contract(&id).await?;
        bb.require_contract_mut()?.replace(data);
        Ok(Status::Success)
    }
}

/// Ask the local faction for a new contract (ship must be docked).
pub struct NegotiateContract;

#[async_trait]
impl Leaf for NegotiateContract {
    const NAME: &'static str = "NegotiateContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let data = bb.ship.negotiate_contract().await?;
        bb.contract = Some(Contract::new(data));
        Ok(Status::Success)
    }
}

pub struct FulfillContract;

#[async_trait]
impl Leaf for FulfillContract {
    const NAME: &'static str = "FulfillContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let contract = bb.require_contract()?;
        if !contract.terms_met() {
            return Err(LeafError::precondition("contract terms not met"));
        }
        let id = contract.id().to_owned();
        let data = bb.ship.fulfill_contract(&id).await?;
        let contract = bb.require_contract_mut()?;
        contract.replace(data);
        info!(contract = %id, revenue = contract.revenue(), "contract complete");
        Ok(Status::Success)
    }
}

/// Deliver what the hold carries of the first open term's good.
///
/// Holding none of it is a no-op `Success`; otherwise exactly one deliver
/// call is made.
pub struct DeliverContract;

#[async_trait]
impl Leaf for DeliverContract {
    const NAME: &'static str = "DeliverContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let contract = bb.require_contract()?;
        let Some(term) = contract.first_open_term() else {
            return Ok(Status::Success);
        };
        let held = bb.ship.units_of(&term.trade_symbol);
        if held == 0 {
            debug!(good = %term.trade_symbol, "nothing to deliver");
            return Ok(Status::Success);
        }
        let id = contract.id().to_owned();
        let good = term.trade_symbol.clone();
        let units = held.min(term.remaining());

        let data = bb.ship.deliver(&id, &good, units).await?;
        bb.require_contract_mut()?.replace(data);
        Ok(Status::Success)
    }
}
