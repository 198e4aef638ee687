//! Condition, setter and action leaves over the [`Blackboard`].
//!
//! # Writing a leaf
//!
//! A leaf is a unit struct (or one carrying fixed configuration, never
//! per-ship data) implementing [`Leaf`].  It returns `Ok(status)` for the
//! normal outcomes and `Err(LeafError)` when something went wrong; the
//! [`LeafNode`] wrapper resolves errors to a status and logs them, so the
//! leaf body reads top-down with `?`.
//!
//! | Module          | Leaves                                                      |
//! |-----------------|-------------------------------------------------------------|
//! | [`conditions`]  | `IsAtDestination`, `CargoIsFull`, `ContractTermsMet`, …     |
//! | [`setters`]     | `SetPurchaseFromContract`, `SetTradeFromBestMarketTrade`, … |
//! | [`movement`]    | `Refuel`, `Orbit`, `Dock`, `Navigate`                       |
//! | [`trade`]       | `Buy`, `SellCargo`, `ScanMarket`, `ScanShipyard`, …         |
//! | [`extraction`]  | `Extract`, `SurveyWaypoint`, `TransferCargoToNearbyTransport` |
//! | [`contract`]    | `AcceptContract`, `NegotiateContract`, `FulfillContract`, `DeliverContract` |
//!
//! `MarkComplete` and `Todo` live here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use st_behavior::{Behavior, Node, Status, selector, sequence};

use crate::Blackboard;
use crate::error::{LeafResult, resolve};

pub mod conditions;
pub mod contract;
pub mod extraction;
pub mod movement;
pub mod setters;
pub mod trade;

pub use conditions::*;
pub use contract::*;
pub use extraction::*;
pub use movement::*;
pub use setters::*;
pub use trade::*;

// ── Leaf trait ────────────────────────────────────────────────────────────────

#[async_trait]
pub trait Leaf: Send + Sync + 'static {
    /// Name used in logs.
    const NAME: &'static str;

    async fn run(&self, bb: &mut Blackboard) -> LeafResult;
}

/// Adapts a [`Leaf`] to a tree node.
pub struct LeafNode<L>(pub L);

#[async_trait]
impl<L: Leaf> Behavior<Blackboard> for LeafNode<L> {
    async fn evaluate(&self, bb: &mut Blackboard) -> Status {
        resolve(L::NAME, self.0.run(bb).await)
    }
}

pub fn leaf<L: Leaf>(l: L) -> Node<Blackboard> {
    Arc::new(LeafNode(l))
}

// ── Composites ────────────────────────────────────────────────────────────────

/// Get to `bb.destination`:
///
/// ```text
/// Selector
/// ├── IsAtDestination
/// ├── InRouteToDestination
/// └── Sequence(Refuel, Orbit, Navigate)
/// ```
pub fn navigation() -> Node<Blackboard> {
    selector(vec![
        leaf(IsAtDestination),
        leaf(InRouteToDestination),
        sequence(vec![leaf(Refuel), leaf(Orbit), leaf(Navigate)]),
    ])
}

// ── Misc ──────────────────────────────────────────────────────────────────────

/// Flags the current task as done for the mission.
pub struct MarkComplete;

#[async_trait]
impl Leaf for MarkComplete {
    const NAME: &'static str = "MarkComplete";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.complete = true;
        Ok(Status::Success)
    }
}

/// Placeholder for behavior that does not exist yet.  Always `Running`.
pub struct Todo(pub &'static str);

#[async_trait]
impl Leaf for Todo {
    const NAME: &'static str = "Todo";

    async fn run(&self, _bb: &mut Blackboard) -> LeafResult {
        warn!(todo = self.0, "no behavior");
        Ok(Status::Running)
    }
}
