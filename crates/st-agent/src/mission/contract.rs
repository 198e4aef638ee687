//! Source, deliver and fulfill one procurement contract.

use chrono::Utc;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use st_api::ContractData;
use st_behavior::{Node, invert, selector, sequence};

use crate::leaves::*;
use crate::mission::{Mission, Role, Roster};
use crate::{Blackboard, Contract, Services};

/// Every ship on the mission works the same contract.
///
/// Passes overlap, so a pass's copy may be older than the slot by the time
/// it concludes.  [`conclude`](Mission::conclude) merges instead of
/// overwriting: a closed contract never comes back, and a view with less
/// [`progress`](Contract::progress) than the slot is dropped.
pub struct ContractMission {
    services: Services,
    roster:   Roster,
    slot:     Mutex<ContractSlot>,
}

#[derive(Default)]
struct ContractSlot {
    current: Option<Contract>,
    /// Ids fulfilled or expired while on this mission.
    closed:  FxHashSet<String>,
}

impl ContractSlot {
    fn close(&mut self, c: &Contract) {
        self.closed.insert(c.id().to_owned());
        if self.current.as_ref().is_some_and(|cur| cur.id() == c.id()) {
            self.current = None;
        }
    }
}

impl ContractMission {
    /// `contract = None` makes the first ship negotiate one.
    pub fn new(services: Services, contract: Option<ContractData>) -> Self {
        let tree = contract_tree();
        let roster = Roster::new()
            .with_behavior(Role::Transporter, tree.clone())
            .with_behavior(Role::Hauler, tree.clone())
            .with_behavior(Role::Trader, tree);
        let slot = ContractSlot { current: contract.map(Contract::new), ..Default::default() };
        Self { services, roster, slot: Mutex::new(slot) }
    }

    pub fn contract(&self) -> Option<Contract> {
        self.slot.lock().current.clone()
    }
}

impl Mission for ContractMission {
    fn name(&self) -> &str {
        "contract"
    }

    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn services(&self) -> &Services {
        &self.services
    }

    fn prepare(&self, bb: &mut Blackboard) {
        bb.contract = self.slot.lock().current.clone();
    }

    fn conclude(&self, bb: &mut Blackboard) {
        let Some(c) = bb.contract.take() else {
            return;
        };
        let mut slot = self.slot.lock();
        if slot.closed.contains(c.id()) {
            debug!(contract = c.id(), "stale view of a closed contract dropped");
            return;
        }
        if c.is_fulfilled() {
            info!(contract = c.id(), revenue = c.revenue(), "contract done");
            slot.close(&c);
            return;
        }
        if c.is_expired(Utc::now()) {
            info!(contract = c.id(), "contract expired");
            slot.close(&c);
            return;
        }
        match &slot.current {
            Some(cur) if cur.id() != c.id() => {
                debug!(held = cur.id(), other = c.id(), "mission already works another contract");
            }
            Some(cur) if c.progress() < cur.progress() => {
                debug!(contract = c.id(), "stale contract view dropped");
            }
            _ => slot.current = Some(c),
        }
    }
}

/// ```text
/// Selector
/// ├── Sequence(HasContract, ContractIsFulfilled)
/// ├── Sequence(!HasContract, Dock, NegotiateContract)
/// ├── Sequence(ContractTermsMet, FulfillContract)
/// └── Sequence
///     ├── Selector(!HasNonContractGoods, SellNonContractCargo)
///     ├── Selector(CargoIsFull, HasRemainingContractUnits,
///     │            Sequence(SetPurchaseFromContract, navigation, Dock, Buy))
///     ├── SetDeliveryDestFromContract
///     ├── navigation
///     ├── Dock
///     ├── Selector(ContractAccepted, AcceptContract)
///     └── DeliverContract
/// ```
pub fn contract_tree() -> Node<Blackboard> {
    selector(vec![
        sequence(vec![leaf(HasContract), leaf(ContractIsFulfilled)]),
        sequence(vec![invert(leaf(HasContract)), leaf(Dock), leaf(NegotiateContract)]),
        sequence(vec![leaf(ContractTermsMet), leaf(FulfillContract)]),
        sequence(vec![
            selector(vec![invert(leaf(HasNonContractGoods)), leaf(SellNonContractCargo)]),
            selector(vec![
                leaf(CargoIsFull),
                leaf(HasRemainingContractUnits),
                sequence(vec![leaf(SetPurchaseFromContract), navigation(), leaf(Dock), leaf(Buy)]),
            ]),
            leaf(SetDeliveryDestFromContract),
            navigation(),
            leaf(Dock),
            selector(vec![leaf(ContractAccepted), leaf(AcceptContract)]),
            leaf(DeliverContract),
        ]),
    ])
}
