//! Unit tests for st-routing.
//!
//! All tests use hand-built or seeded-random graphs; no cache is involved.

#[cfg(test)]
mod helpers {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use st_core::{Coord, FlightMode, WaypointSymbol};

    use crate::{WaypointGraph, WaypointGraphBuilder};

    pub fn wp(s: &str) -> WaypointSymbol {
        WaypointSymbol::from(s)
    }

    /// Four waypoints on a line, 100 units apart.  A and C sell fuel.
    ///
    /// ```text
    ///   A ──100── B ──100── C ──100── D
    ///  (M)                 (M)
    /// ```
    pub fn line_system(mode: FlightMode) -> WaypointGraph {
        let mut b = WaypointGraphBuilder::new();
        b.add_node("X1-L-A", Coord::new(0, 0), true);
        b.add_node("X1-L-B", Coord::new(100, 0), false);
        b.add_node("X1-L-C", Coord::new(200, 0), true);
        b.add_node("X1-L-D", Coord::new(300, 0), false);
        b.build(mode)
    }

    /// A random system of `n` waypoints.  `market_odds` is the chance a
    /// waypoint sells fuel.
    pub fn random_system(rng: &mut SmallRng, n: usize, market_odds: f64, mode: FlightMode) -> WaypointGraph {
        let mut b = WaypointGraphBuilder::new();
        for i in 0..n {
            let c = Coord::new(rng.gen_range(-120..=120), rng.gen_range(-120..=120));
            b.add_node(format!("X1-R-{i}"), c, rng.gen_bool(market_odds));
        }
        b.build(mode)
    }

    pub fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    /// Classic node-only Dijkstra over truncated distances.
    pub fn plain_shortest(g: &WaypointGraph, from: usize, to: usize) -> u64 {
        let n = g.node_count();
        let mut dist = vec![u64::MAX; n];
        let mut done = vec![false; n];
        dist[from] = 0;
        for _ in 0..n {
            let Some(u) = (0..n).filter(|&i| !done[i]).min_by_key(|&i| dist[i]) else {
                break;
            };
            done[u] = true;
            for v in 0..n {
                if v != u && dist[u] != u64::MAX {
                    let c = dist[u] + u64::from(g.edge(u, v).distance);
                    if c < dist[v] {
                        dist[v] = c;
                    }
                }
            }
        }
        dist[to]
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use st_api::{MARKETPLACE, Waypoint};
    use st_core::{Coord, FlightMode, SystemSymbol, WaypointSymbol};

    use crate::{WaypointGraph, WaypointGraphBuilder, fuel_cost};

    #[test]
    fn empty_build() {
        let g = WaypointGraphBuilder::new().build(FlightMode::Cruise);
        assert!(g.is_empty());
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn complete_and_symmetric() {
        let g = super::helpers::line_system(FlightMode::Cruise);
        for i in 0..g.node_count() {
            for j in 0..g.node_count() {
                assert_eq!(g.edge(i, j), g.edge(j, i));
                if i != j {
                    assert!(g.edge(i, j).fuel >= 1);
                }
            }
        }
        assert_eq!(g.edge(0, 3).distance, 300);
    }

    #[test]
    fn edge_fuel_follows_mode() {
        let burn = super::helpers::line_system(FlightMode::Burn);
        assert_eq!(burn.edge(0, 1).fuel, 200);
        let drift = super::helpers::line_system(FlightMode::Drift);
        assert_eq!(drift.edge(0, 3).fuel, 1);
        assert_eq!(fuel_cost(0, FlightMode::Stealth), 1);
    }

    #[test]
    fn marketplace_trait_marks_refuel() {
        let wps = vec![
            Waypoint {
                symbol:        WaypointSymbol::from("X1-A-1"),
                system_symbol: SystemSymbol::from("X1-A"),
                kind:          "PLANET".into(),
                x: 0,
                y: 0,
                traits:        vec![MARKETPLACE.into()],
            },
            Waypoint {
                symbol:        WaypointSymbol::from("X1-A-2"),
                system_symbol: SystemSymbol::from("X1-A"),
                kind:          "MOON".into(),
                x: 3,
                y: 4,
                traits:        vec![],
            },
        ];
        let g = WaypointGraph::from_waypoints(&wps, FlightMode::Cruise);
        let a = g.index_of("X1-A-1").unwrap();
        let b = g.index_of("X1-A-2").unwrap();
        assert!(g.node(a).can_refuel);
        assert!(!g.node(b).can_refuel);
        assert_eq!(g.edge(a, b).distance, 5);
    }

    #[test]
    fn duplicate_symbol_replaces() {
        let mut b = WaypointGraphBuilder::new();
        let i = b.add_node("X1-A-1", Coord::new(0, 0), false);
        let j = b.add_node("X1-A-1", Coord::new(9, 9), true);
        assert_eq!(i, j);
        let g = b.build(FlightMode::Cruise);
        assert_eq!(g.node_count(), 1);
        assert!(g.node(0).can_refuel);
    }
}

// ── Planning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planning {
    use st_core::{FlightMode, PlannerConfig};

    use super::helpers::{line_system, wp};
    use crate::{FuelGauge, FuelPlanner, HopKind, RoutePlanner, RoutingError, WaypointGraphBuilder};

    fn full(capacity: u32) -> FuelGauge {
        FuelGauge { current: capacity, capacity }
    }

    #[test]
    fn same_waypoint_is_trivial() {
        let g = line_system(FlightMode::Cruise);
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-A"), &wp("X1-L-A"), full(100)).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.cost, 0);
        assert_eq!(r.waypoints, vec![wp("X1-L-A")]);
    }

    #[test]
    fn unknown_waypoint() {
        let g = line_system(FlightMode::Cruise);
        let err = FuelPlanner::default()
            .plan(&g, &wp("X1-L-A"), &wp("X1-L-Z"), full(100))
            .unwrap_err();
        assert_eq!(err, RoutingError::UnknownWaypoint(wp("X1-L-Z")));
    }

    #[test]
    fn direct_hop_when_fuel_suffices() {
        let g = line_system(FlightMode::Cruise);
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-A"), &wp("X1-L-B"), full(150)).unwrap();
        assert_eq!(r.cost, 100);
        assert_eq!(r.hops.len(), 1);
        assert_eq!(r.hops[0].kind, HopKind::Direct);
        assert_eq!(r.waypoints, vec![wp("X1-L-A"), wp("X1-L-B")]);
    }

    #[test]
    fn refuel_beats_drift() {
        let g = line_system(FlightMode::Cruise);
        let gauge = FuelGauge { current: 50, capacity: 150 };
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-A"), &wp("X1-L-B"), gauge).unwrap();
        // one 100-unit block at 72 credits
        assert_eq!(r.cost, 100 + 72);
        assert_eq!(r.next_hop().unwrap().kind, HopKind::Refuel);
    }

    #[test]
    fn starts_from_current_fuel() {
        let g = line_system(FlightMode::Cruise);
        let gauge = FuelGauge { current: 0, capacity: 150 };
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-A"), &wp("X1-L-B"), gauge).unwrap();
        // 150 missing → two blocks
        assert_eq!(r.cost, 100 + 2 * 72);
        assert_eq!(r.hops[0].kind, HopKind::Refuel);
    }

    #[test]
    fn stops_to_refuel_midway() {
        let g = line_system(FlightMode::Cruise);
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-A"), &wp("X1-L-D"), full(250)).unwrap();
        // Reach C with 50 left, buy two blocks, fly the last 100.
        assert_eq!(r.cost, 300 + 2 * 72);
        assert!(r.hops.iter().all(|h| h.kind != HopKind::Drift));
        let last = r.hops.last().unwrap();
        assert_eq!(last.from, wp("X1-L-C"));
        assert_eq!(last.kind, HopKind::Refuel);
        assert_eq!(r.waypoints.first(), Some(&wp("X1-L-A")));
        assert_eq!(r.waypoints.last(), Some(&wp("X1-L-D")));
    }

    #[test]
    fn drifts_when_nothing_else_works() {
        let mut b = WaypointGraphBuilder::new();
        b.add_node("X1-N-A", st_core::Coord::new(0, 0), false);
        b.add_node("X1-N-B", st_core::Coord::new(500, 0), false);
        let g = b.build(FlightMode::Cruise);

        let r = FuelPlanner::default().plan(&g, &wp("X1-N-A"), &wp("X1-N-B"), full(100)).unwrap();
        assert_eq!(r.cost, 500 + 10_000);
        assert_eq!(r.hops[0].kind, HopKind::Drift);
        assert_eq!(r.hops[0].fuel, 1);

        let cheap = FuelPlanner::new(PlannerConfig { drift_penalty: 7, ..PlannerConfig::default() });
        let r = cheap.plan(&g, &wp("X1-N-A"), &wp("X1-N-B"), full(100)).unwrap();
        assert_eq!(r.cost, 507);
    }

    #[test]
    fn burn_mode_doubles_fuel() {
        let g = line_system(FlightMode::Burn);
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-B"), &wp("X1-L-C"), full(250)).unwrap();
        assert_eq!(r.cost, 100);
        assert_eq!(r.hops[0].fuel, 200);

        // 150 in the tank is not enough for a 200-fuel burn and B sells nothing.
        let r = FuelPlanner::default()
            .plan(&g, &wp("X1-L-B"), &wp("X1-L-C"), FuelGauge { current: 150, capacity: 250 })
            .unwrap();
        assert_ne!(r.hops[0].kind, HopKind::Direct);
    }

    #[test]
    fn zero_capacity_never_needs_fuel() {
        let g = line_system(FlightMode::Cruise);
        let r = FuelPlanner::default().plan(&g, &wp("X1-L-A"), &wp("X1-L-D"), full(0)).unwrap();
        assert_eq!(r.cost, 300);
        assert_eq!(r.hops.len(), 1);
        assert_eq!(r.hops[0].kind, HopKind::Direct);
    }
}

// ── Properties over random systems ────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use rand::Rng;

    use st_core::FlightMode;

    use super::helpers::{plain_shortest, random_system, rng};
    use crate::{FuelGauge, FuelPlanner, HopKind, RoutePlanner};

    /// Between refuels, the fuel burned by direct hops never exceeds what the
    /// tank held.  Drift and refuel transitions reset the budget.
    #[test]
    fn fuel_feasibility() {
        let mut r = rng(0x5eed);
        let planner = FuelPlanner::default();
        let modes = [FlightMode::Cruise, FlightMode::Burn, FlightMode::Stealth];

        for _ in 0..60 {
            let n = r.gen_range(2..=7);
            let mode = modes[r.gen_range(0..modes.len())];
            let g = random_system(&mut r, n, 0.35, mode);
            let capacity = r.gen_range(20..=300);
            let gauge = FuelGauge { current: r.gen_range(0..=capacity), capacity };

            for from in 0..n {
                for to in 0..n {
                    let origin = g.node(from).symbol.clone();
                    let dest = g.node(to).symbol.clone();
                    let route = planner.plan(&g, &origin, &dest, gauge).unwrap();

                    assert_eq!(route.waypoints.len(), route.hops.len() + 1);
                    assert_eq!(route.waypoints.first(), Some(&origin));
                    assert_eq!(route.waypoints.last(), Some(&dest));

                    let mut budget = gauge.current;
                    for hop in &route.hops {
                        match hop.kind {
                            HopKind::Direct => {
                                assert!(hop.fuel <= budget, "direct hop {hop:?} with {budget} left");
                                budget -= hop.fuel;
                            }
                            HopKind::Refuel => {
                                let i = g.index_of(&hop.from).unwrap();
                                assert!(g.node(i).can_refuel, "refuelled at {}", hop.from);
                                assert!(hop.fuel <= capacity);
                                budget = capacity - hop.fuel;
                            }
                            HopKind::Drift => {
                                budget = budget.saturating_sub(1);
                            }
                        }
                    }
                }
            }
        }
    }

    /// With no fuel stops and an effectively bottomless tank, the search
    /// reduces to a plain shortest path.
    #[test]
    fn optimal_without_fuel_constraints() {
        let mut r = rng(42);
        let planner = FuelPlanner::default();
        let bottomless = FuelGauge { current: 1_000_000, capacity: 1_000_000 };

        for _ in 0..40 {
            let n = r.gen_range(2..=7);
            let g = random_system(&mut r, n, 0.0, FlightMode::Cruise);
            for from in 0..n {
                for to in 0..n {
                    let route = planner
                        .plan(&g, &g.node(from).symbol, &g.node(to).symbol, bottomless)
                        .unwrap();
                    assert_eq!(route.cost, plain_shortest(&g, from, to));
                    assert!(route.hops.iter().all(|h| h.kind == HopKind::Direct));
                }
            }
        }
    }
}
