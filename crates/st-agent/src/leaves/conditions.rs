//! Condition leaves.  None of them call the remote API.
//!
//! A condition answers `Success`/`Failure`; `Running` only where noted
//! (a ship still in flight towards the waypoint in question).

use async_trait::async_trait;
use chrono::Utc;

use st_behavior::Status;
use st_core::WaypointSymbol;

use super::Leaf;
use crate::Blackboard;
use crate::error::LeafResult;

/// At `destination` and not in flight.
pub struct IsAtDestination;

#[async_trait]
impl Leaf for IsAtDestination {
    const NAME: &'static str = "IsAtDestination";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let dest = bb.require_destination()?;
        Ok(Status::from_bool(bb.ship.is_at(dest) && !bb.ship.in_transit()))
    }
}

/// `Running` while in flight towards `destination`, `Failure` otherwise.
pub struct InRouteToDestination;

#[async_trait]
impl Leaf for InRouteToDestination {
    const NAME: &'static str = "InRouteToDestination";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let dest = bb.require_destination()?;
        if bb.ship.in_transit() && &bb.ship.route_destination() == dest {
            return Ok(Status::Running);
        }
        Ok(Status::Failure)
    }
}

/// At a fixed waypoint.
pub struct IsAtWaypoint(pub WaypointSymbol);

#[async_trait]
impl Leaf for IsAtWaypoint {
    const NAME: &'static str = "IsAtWaypoint";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.ship.is_at(&self.0) && !bb.ship.in_transit()))
    }
}

/// `Running` while still flying in to the extraction waypoint.
pub struct IsAtExtractionWaypoint;

#[async_trait]
impl Leaf for IsAtExtractionWaypoint {
    const NAME: &'static str = "IsAtExtractionWaypoint";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let wp = bb.require_extraction_waypoint()?;
        if !bb.ship.is_at(wp) {
            return Ok(Status::Failure);
        }
        if bb.ship.in_transit() {
            return Ok(Status::Running);
        }
        Ok(Status::Success)
    }
}

pub struct HasCargo;

#[async_trait]
impl Leaf for HasCargo {
    const NAME: &'static str = "HasCargo";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(!bb.ship.is_cargo_empty()))
    }
}

pub struct CargoIsFull;

#[async_trait]
impl Leaf for CargoIsFull {
    const NAME: &'static str = "CargoIsFull";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.ship.is_cargo_full()))
    }
}

pub struct InCooldown;

#[async_trait]
impl Leaf for InCooldown {
    const NAME: &'static str = "InCooldown";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.ship.in_cooldown()))
    }
}

/// `Success` when full, `Running` until then.
pub struct WaitForCargoFull;

#[async_trait]
impl Leaf for WaitForCargoFull {
    const NAME: &'static str = "WaitForCargoFull";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        if bb.ship.is_cargo_full() {
            return Ok(Status::Success);
        }
        Ok(Status::Running)
    }
}

// ── Contract conditions ───────────────────────────────────────────────────────

/// Never `Running`: a missing contract is an answer here, not a wiring bug.
pub struct HasContract;

#[async_trait]
impl Leaf for HasContract {
    const NAME: &'static str = "HasContract";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.contract.is_some()))
    }
}

pub struct ContractIsActive;

#[async_trait]
impl Leaf for ContractIsActive {
    const NAME: &'static str = "ContractIsActive";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.require_contract()?.is_active(Utc::now())))
    }
}

pub struct ContractIsFulfilled;

#[async_trait]
impl Leaf for ContractIsFulfilled {
    const NAME: &'static str = "ContractIsFulfilled";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.require_contract()?.is_fulfilled()))
    }
}

pub struct ContractAccepted;

#[async_trait]
impl Leaf for ContractAccepted {
    const NAME: &'static str = "ContractAccepted";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.require_contract()?.is_accepted()))
    }
}

pub struct ContractTermsMet;

#[async_trait]
impl Leaf for ContractTermsMet {
    const NAME: &'static str = "ContractTermsMet";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.require_contract()?.terms_met()))
    }
}

/// The hold covers what is still owed on some open term.
pub struct HasRemainingContractUnits;

#[async_trait]
impl Leaf for HasRemainingContractUnits {
    const NAME: &'static str = "HasRemainingContractUnits";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let contract = bb.require_contract()?;
        let covered = contract
            .terms()
            .iter()
            .filter(|d| d.remaining() > 0)
            .any(|d| bb.ship.units_of(&d.trade_symbol) >= d.remaining());
        Ok(Status::from_bool(covered))
    }
}

/// The hold contains a good no delivery term asks for.
pub struct HasNonContractGoods;

#[async_trait]
impl Leaf for HasNonContractGoods {
    const NAME: &'static str = "HasNonContractGoods";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let contract = bb.require_contract()?;
        let stray = bb.ship.inventory_symbols().iter().any(|g| !contract.requires(g));
        Ok(Status::from_bool(stray))
    }
}

pub struct HasTrade;

#[async_trait]
impl Leaf for HasTrade {
    const NAME: &'static str = "HasTrade";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        Ok(Status::from_bool(bb.trade.is_some()))
    }
}
