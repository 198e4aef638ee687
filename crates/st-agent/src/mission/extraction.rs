//! Mine one waypoint and move the ore to market.
//!
//! | Role                   | Tree                                              |
//! |------------------------|---------------------------------------------------|
//! | `Excavator`            | go to the waypoint, hand ore to a hauler, extract |
//! | `Hauler`/`Transporter` | wait at the waypoint until full, then sell        |
//! | `ExcavatorTransporter` | extract until full, then sell                     |
//! | `Surveyor`             | go to the waypoint, survey whenever off cooldown  |
//!
//! Surveys from every surveyor go into one pool.  Each excavator pass picks
//! the best unexpired survey from it.

use std::cmp::Reverse;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::debug;

use st_api::Survey;
use st_behavior::{Node, invert, selector, sequence};
use st_core::WaypointSymbol;

use crate::leaves::*;
use crate::mission::{Mission, Role, Roster};
use crate::{Blackboard, Services};

pub struct ExtractionMission {
    services: Services,
    roster:   Roster,
    waypoint: WaypointSymbol,
    surveys:  Mutex<Vec<Survey>>,
}

impl ExtractionMission {
    pub fn new(services: Services, waypoint: impl Into<WaypointSymbol>) -> Self {
        let hauler = hauler_tree();
        let roster = Roster::new()
            .with_behavior(Role::Excavator, excavator_tree())
            .with_behavior(Role::Hauler, hauler.clone())
            .with_behavior(Role::Transporter, hauler)
            .with_behavior(Role::ExcavatorTransporter, excavator_transporter_tree())
            .with_behavior(Role::Surveyor, surveyor_tree());
        Self { services, roster, waypoint: waypoint.into(), surveys: Mutex::new(Vec::new()) }
    }

    pub fn waypoint(&self) -> &WaypointSymbol {
        &self.waypoint
    }

    /// Unexpired surveys currently in the pool.
    pub fn surveys(&self) -> Vec<Survey> {
        let now = Utc::now();
        self.surveys.lock().iter().filter(|s| s.expiration > now).cloned().collect()
    }
}

fn size_rank(size: &str) -> u8 {
    match size {
        "LARGE" => 3,
        "MODERATE" => 2,
        "SMALL" => 1,
        _ => 0,
    }
}

impl Mission for ExtractionMission {
    fn name(&self) -> &str {
        "extraction"
    }

    fn roster(&self) -> &Roster {
        &self.roster
    }

    fn services(&self) -> &Services {
        &self.services
    }

    fn prepare(&self, bb: &mut Blackboard) {
        bb.extraction_waypoint = Some(self.waypoint.clone());
        let now = Utc::now();
        let mut pool = self.surveys.lock();
        pool.retain(|s| s.expiration > now);
        bb.survey = pool
            .iter()
            .filter(|s| s.symbol == self.waypoint)
            .max_by_key(|s| (size_rank(&s.size), s.deposits.len(), Reverse(s.signature.clone())))
            .cloned();
    }

    fn conclude(&self, bb: &mut Blackboard) {
        if bb.new_surveys.is_empty() {
            return;
        }
        debug!(count = bb.new_surveys.len(), "surveys pooled");
        self.surveys.lock().append(&mut bb.new_surveys);
    }
}

// ── Trees ─────────────────────────────────────────────────────────────────────

fn goto_extraction() -> Node<Blackboard> {
    sequence(vec![
        invert(leaf(IsAtExtractionWaypoint)),
        leaf(SetDestinationToExtractionWaypoint),
        navigation(),
    ])
}

fn extract() -> Node<Blackboard> {
    sequence(vec![
        leaf(IsAtExtractionWaypoint),
        leaf(JettisonNonSellableCargo),
        invert(leaf(CargoIsFull)),
        leaf(Extract),
    ])
}

fn sell() -> Node<Blackboard> {
    sequence(vec![
        leaf(JettisonNonSellableCargo),
        leaf(HasCargo),
        leaf(SetDestinationToBestMarketToSellCargo),
        navigation(),
        leaf(Dock),
        leaf(SellCargo),
    ])
}

fn transfer() -> Node<Blackboard> {
    sequence(vec![
        leaf(JettisonNonSellableCargo),
        leaf(HasCargo),
        leaf(TransferCargoToNearbyTransport),
    ])
}

pub fn excavator_tree() -> Node<Blackboard> {
    selector(vec![goto_extraction(), transfer(), extract()])
}

pub fn hauler_tree() -> Node<Blackboard> {
    selector(vec![
        sequence(vec![leaf(IsAtExtractionWaypoint), invert(leaf(CargoIsFull))]),
        sell(),
        goto_extraction(),
    ])
}

pub fn excavator_transporter_tree() -> Node<Blackboard> {
    selector(vec![extract(), sell(), goto_extraction()])
}

pub fn surveyor_tree() -> Node<Blackboard> {
    selector(vec![
        goto_extraction(),
        sequence(vec![
            leaf(IsAtExtractionWaypoint),
            invert(leaf(InCooldown)),
            leaf(SurveyWaypoint),
        ]),
    ])
}
