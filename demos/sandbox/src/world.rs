//! The simulated starter system the sandbox flies in.
//!
//! Three markets in a row plus an asteroid field off to the side.  Copper is
//! cheap at HQ and dear at the foundry; the foundry also takes iron ore.

use chrono::{Duration, Utc};

use st_api::sim::{self, SimulatedClient};
use st_api::{ContractData, ContractTerms, DeliverTerm, MARKETPLACE, Payment, TradeKind};

pub const HQ:       &str = "X1-DEMO-HQ";
pub const FIELD:    &str = "X1-DEMO-FIELD";
pub const DEPOT:    &str = "X1-DEMO-DEPOT";
pub const FOUNDRY:  &str = "X1-DEMO-FOUNDRY";
pub const SYSTEM:   &str = "X1-DEMO";

pub const COMMAND:  &str = "DEMO-1";
pub const MINER:    &str = "DEMO-2";
pub const HAULER:   &str = "DEMO-3";
pub const PROBE:    &str = "DEMO-4";
pub const TRADER:   &str = "DEMO-5";

pub const CONTRACT: &str = "demo-contract";

/// `travel` scales every flight; `cooldown` is seconds after extract or survey.
pub fn build_world(travel: f64, cooldown: u32) -> SimulatedClient {
    SimulatedClient::new()
        .with_travel_secs_per_unit(travel)
        .with_cooldown_secs(cooldown)
        .with_waypoint(sim::waypoint(HQ,      0,  0, &[MARKETPLACE]))
        .with_waypoint(sim::waypoint(DEPOT,   25, 0, &[MARKETPLACE]))
        .with_waypoint(sim::waypoint(FOUNDRY, 50, 0, &[MARKETPLACE]))
        .with_waypoint(sim::waypoint(FIELD,   10, 30, &[]))
        .with_market(sim::market(HQ, &[
            ("FUEL",     TradeKind::Exchange, 100, 2),
            ("COPPER",   TradeKind::Export,   20,  30),
        ]))
        .with_market(sim::market(DEPOT, &[
            ("FUEL",     TradeKind::Exchange, 100, 3),
            ("IRON_ORE", TradeKind::Import,   30,  40),
        ]))
        .with_market(sim::market(FOUNDRY, &[
            ("FUEL",     TradeKind::Exchange, 100, 3),
            ("COPPER",   TradeKind::Import,   20,  90),
            ("IRON_ORE", TradeKind::Import,   30,  60),
        ]))
        .with_yield(FIELD, "IRON_ORE", 7)
        .with_yield(FIELD, "QUARTZ_SAND", 3)
        .with_ship(sim::ship(COMMAND, HQ,    400, 400, 40))
        .with_ship(sim::ship(MINER,   FIELD, 100, 100, 15))
        .with_ship(sim::ship(HAULER,  FIELD, 300, 300, 60))
        .with_ship(sim::ship(PROBE,   HQ,    0,   0,   0))
        .with_ship(sim::ship(TRADER,  HQ,    400, 400, 40))
        .with_contract(starter_contract())
}

/// Thirty copper to the foundry, not yet accepted.
fn starter_contract() -> ContractData {
    let now = Utc::now();
    ContractData {
        id:             CONTRACT.to_owned(),
        faction_symbol: "COSMIC".to_owned(),
        kind:           "PROCUREMENT".to_owned(),
        terms: ContractTerms {
            deadline: now + Duration::days(7),
            payment:  Payment { on_accepted: 1_000, on_fulfilled: 9_000 },
            deliver:  vec![DeliverTerm {
                trade_symbol:       "COPPER".into(),
                destination_symbol: FOUNDRY.into(),
                units_required:     30,
                units_fulfilled:    0,
            }],
        },
        accepted:           false,
        fulfilled:          false,
        deadline_to_accept: Some(now + Duration::days(1)),
    }
}
