//! Missions: which tree each ship runs, and the state carried between passes.
//!
//! # Ownership
//!
//! Missions are owned by whoever created them (the fleet) as
//! `Arc<dyn Mission>`.  A mission's [`Roster`] holds `Arc<Ship>`s; a ship
//! points back at its mission through a `Weak`, so dropping a mission
//! leaves its ships idle rather than leaking the pair.
//!
//! | Mission              | Roles                                           | Carries                   |
//! |----------------------|-------------------------------------------------|---------------------------|
//! | `ContractMission`    | Transporter, Hauler, Trader                     | the contract              |
//! | `ExtractionMission`  | Excavator, Hauler, Transporter, ExcavatorTransporter, Surveyor | extraction waypoint, survey pool |
//! | `TradeMission`       | Trader                                          | per-ship trade intent     |
//! | `MarketReconMission` | Satellite (forced)                              | per-ship market cursor    |
//! | `IdleMission`        | none                                            | nothing                   |

use std::fmt;
use std::sync::Arc;

use tracing::{Instrument, debug};

use st_behavior::Status;

use crate::{Blackboard, Services, Ship};

pub mod contract;
pub mod extraction;
pub mod idle;
pub mod recon;
pub mod roster;
pub mod trade;

pub use contract::ContractMission;
pub use extraction::ExtractionMission;
pub use idle::IdleMission;
pub use recon::MarketReconMission;
pub use roster::Roster;
pub use trade::TradeMission;

// ── Role ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Excavator,
    Transporter,
    Surveyor,
    ExcavatorTransporter,
    Trader,
    Hauler,
    Satellite,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Excavator => "excavator",
            Role::Transporter => "transporter",
            Role::Surveyor => "surveyor",
            Role::ExcavatorTransporter => "excavator-transporter",
            Role::Trader => "trader",
            Role::Hauler => "hauler",
            Role::Satellite => "satellite",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Mission trait ─────────────────────────────────────────────────────────────

pub trait Mission: Send + Sync {
    fn name(&self) -> &str;

    fn roster(&self) -> &Roster;

    fn services(&self) -> &Services;

    /// The role a ship actually gets when `requested` is asked for.
    fn admit(&self, requested: Role) -> Role {
        requested
    }

    /// Copy carried state onto a fresh blackboard.
    fn prepare(&self, _bb: &mut Blackboard) {}

    /// Persist what the pass changed.
    fn conclude(&self, _bb: &mut Blackboard) {}
}

/// Put `ship` on `mission` as `role` (subject to [`Mission::admit`]) and
/// point the ship at the mission.  A ship leaving another mission is taken
/// off that mission's roster first.
pub fn assign(mission: &Arc<dyn Mission>, role: Role, ship: &Arc<Ship>) {
    if let Some(old) = ship.mission() {
        if !std::ptr::addr_eq(Arc::as_ptr(&old), Arc::as_ptr(mission)) {
            old.roster().unassign(ship.symbol());
            debug!(ship = %ship.symbol(), from = old.name(), "left mission");
        }
    }
    let role = mission.admit(role);
    mission.roster().assign(role, ship.clone());
    ship.set_mission(Arc::downgrade(mission));
    tracing::info!(ship = %ship.symbol(), mission = mission.name(), %role, "assigned");
}

/// One evaluation of `ship`'s role tree under `mission`.
pub async fn run_pass(mission: &Arc<dyn Mission>, ship: &Arc<Ship>) -> Status {
    let roster = mission.roster();
    let tree = roster.behavior_for(ship.symbol());

    let mut bb = Blackboard::new(ship.clone(), mission.services());
    bb.mission = Some(mission.clone());
    bb.span.record("mission", mission.name());
    if let Some(role) = roster.role_of(ship.symbol()) {
        bb.span.record("role", role.as_str());
    }

    mission.prepare(&mut bb);
    let span = bb.span.clone();
    let status = tree.evaluate(&mut bb).instrument(span.clone()).await;
    mission.conclude(&mut bb);

    span.in_scope(|| debug!(%status, "pass complete"));
    status
}
