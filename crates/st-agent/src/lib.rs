//! `st-agent` — ships, their behavior leaves, and the missions that drive them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`ship`]       | `Ship`: mirrored remote state plus async remote actions         |
//! | [`contract`]   | `Contract` wrapper: expiry, revenue, open terms                 |
//! | [`blackboard`] | `Blackboard` per-pass context, `Services`, `TradeIntent`        |
//! | [`leaves`]     | `Leaf` trait, every condition/setter/action leaf, `navigation()` |
//! | [`mission`]    | `Role`, `Roster`, `Mission` trait, the concrete missions        |
//! | [`control`]    | Per-ship control loop and sleep computation                     |
//! | [`error`]      | `ShipError`, `LeafError`, the leaf-result resolver              |
//!
//! # Design notes
//!
//! A pass is one evaluation of the ship's role tree:
//!
//! 1. **Prepare**: a fresh [`Blackboard`] is built and the mission copies in
//!    the state it carries for this ship (contract, trade plan, extraction
//!    waypoint, survey).
//! 2. **Evaluate**: the shared, stateless tree runs against the blackboard.
//!    Leaves mutate the ship through remote calls; each response replaces
//!    the matching part of the ship's mirror.
//! 3. **Conclude**: the mission writes back whatever must outlive the pass.
//!
//! Leaves return `Result<Status, LeafError>`.  The error never reaches the
//! tree: a single resolver logs it and maps it to `Running` (retry next pass)
//! or `Failure` (let a Selector try another branch).

pub mod blackboard;
pub mod contract;
pub mod control;
pub mod error;
pub mod leaves;
pub mod mission;
pub mod ship;


pub use blackboard::{Blackboard, Services, TradeIntent};
pub use contract::Contract;
pub use control::next_wake;
pub use error::{LeafError, LeafResult, ShipError, ShipResult};
pub use leaves::{Leaf, LeafNode, leaf, navigation};
pub use mission::{
    ContractMission, ExtractionMission, IdleMission, MarketReconMission, Mission, Role, Roster,
    TradeMission, assign, run_pass,
};
pub use ship::Ship;
