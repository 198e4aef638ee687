//! Routing trait and the default fuel-aware Dijkstra.
//!
//! # State space
//!
//! A plain shortest path over waypoints is not enough: whether a hop is
//! possible depends on the fuel left, and the cheapest plan may detour
//! through a market to refuel.  The search therefore runs over
//! `(waypoint, fuel remaining)` states with three transitions out of each:
//!
//! | Transition       | Allowed when                          | Fuel after         | Cost added                          |
//! |------------------|---------------------------------------|--------------------|-------------------------------------|
//! | direct hop       | `fuel ≥ edge.fuel`                    | `fuel − edge.fuel` | `distance`                          |
//! | drift fallback   | `fuel < edge.fuel`                    | `fuel − 1` (sat.)  | `distance + drift_penalty`          |
//! | refuel then hop  | node sells fuel, `cap ≥ edge.fuel`    | `cap − edge.fuel`  | `distance + blocks × block_price`   |
//!
//! `blocks = ceil((cap − fuel) / block_units)`.  Drift is always available,
//! so a destination in the graph is always reachable; the penalty keeps it a
//! last resort.
//!
//! Ships with zero fuel capacity (probes) burn no fuel; for them every hop
//! is direct.
//!
//! # Cost units
//!
//! Costs are unitless `u64`: distance units plus credits.  Ties are broken by
//! heap order and carry no meaning.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use st_core::{PlannerConfig, WaypointSymbol};

use crate::graph::WaypointGraph;
use crate::{RoutingError, RoutingResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// How a hop is flown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HopKind {
    /// Fly in the graph's flight mode on the fuel already in the tank.
    Direct,
    /// Top off at the departure waypoint, then fly.
    Refuel,
    /// Not enough fuel: drift.
    Drift,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hop {
    pub from:     WaypointSymbol,
    pub to:       WaypointSymbol,
    pub kind:     HopKind,
    pub distance: u32,
    /// Fuel burned by this hop (1 for a drift).
    pub fuel:     u32,
}

/// The result of a planning query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub cost:      u64,
    /// Origin through destination, inclusive.
    pub waypoints: Vec<WaypointSymbol>,
    pub hops:      Vec<Hop>,
}

impl Route {
    /// Zero-length route for `origin == destination`.
    pub fn trivial(at: WaypointSymbol) -> Self {
        Route { cost: 0, waypoints: vec![at], hops: Vec::new() }
    }

    /// `true` if the origin and destination are the same waypoint.
    pub fn is_trivial(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn next_hop(&self) -> Option<&Hop> {
        self.hops.first()
    }
}

/// Fuel gauge the plan starts from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FuelGauge {
    pub current:  u32,
    pub capacity: u32,
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable route planner.
///
/// Implementations must be `Send + Sync`; one planner is shared by every
/// ship's control loop.
pub trait RoutePlanner: Send + Sync {
    /// Plan from `origin` to `destination` over `graph`.
    ///
    /// `origin == destination` returns [`Route::trivial`] without searching.
    fn plan(
        &self,
        graph:       &WaypointGraph,
        origin:      &WaypointSymbol,
        destination: &WaypointSymbol,
        gauge:       FuelGauge,
    ) -> RoutingResult<Route>;
}

// ── FuelPlanner ───────────────────────────────────────────────────────────────

/// Dijkstra over `(waypoint, fuel)` states.  See the module docs.
#[derive(Clone, Debug, Default)]
pub struct FuelPlanner {
    config: PlannerConfig,
}

impl FuelPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Credits to top off from `fuel` to `capacity`.
    fn refuel_cost(&self, fuel: u32, capacity: u32) -> u64 {
        let missing = capacity.saturating_sub(fuel);
        let blocks  = missing.div_ceil(self.config.fuel_block_units.max(1));
        u64::from(blocks) * self.config.fuel_price_per_block
    }
}

impl RoutePlanner for FuelPlanner {
    fn plan(
        &self,
        graph:       &WaypointGraph,
        origin:      &WaypointSymbol,
        destination: &WaypointSymbol,
        gauge:       FuelGauge,
    ) -> RoutingResult<Route> {
        if origin == destination {
            return Ok(Route::trivial(origin.clone()));
        }
        let from = graph
            .index_of(origin)
            .ok_or_else(|| RoutingError::UnknownWaypoint(origin.clone()))?;
        let to = graph
            .index_of(destination)
            .ok_or_else(|| RoutingError::UnknownWaypoint(destination.clone()))?;

        search(self, graph, from, to, gauge).ok_or_else(|| RoutingError::NoRoute {
            from: origin.clone(),
            to:   destination.clone(),
        })
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

type State = (usize, u32);

fn search(
    planner: &FuelPlanner,
    graph:   &WaypointGraph,
    from:    usize,
    to:      usize,
    gauge:   FuelGauge,
) -> Option<Route> {
    let capacity = gauge.capacity;
    let start: State = (from, gauge.current.min(capacity));
    let penalty = planner.config.drift_penalty;

    // dist[s] = best known cost to reach state s.
    let mut dist: FxHashMap<State, u64> = FxHashMap::default();
    // prev[s] = (predecessor state, transition) that reached s.
    let mut prev: FxHashMap<State, (State, HopKind)> = FxHashMap::default();

    dist.insert(start, 0);
    let mut heap: BinaryHeap<Reverse<(u64, usize, u32)>> = BinaryHeap::new();
    heap.push(Reverse((0, start.0, start.1)));

    while let Some(Reverse((cost, node, fuel))) = heap.pop() {
        if node == to {
            return Some(reconstruct(graph, &prev, start, (node, fuel), cost));
        }

        // Skip stale heap entries.
        if dist.get(&(node, fuel)).is_some_and(|&best| cost > best) {
            continue;
        }

        let can_refuel = graph.node(node).can_refuel;

        for next in 0..graph.node_count() {
            if next == node {
                continue;
            }
            let edge = graph.edge(node, next);
            let d = u64::from(edge.distance);

            let mut relax = |state: State, new_cost: u64, kind: HopKind| {
                if dist.get(&state).is_none_or(|&best| new_cost < best) {
                    dist.insert(state, new_cost);
                    prev.insert(state, ((node, fuel), kind));
                    heap.push(Reverse((new_cost, state.0, state.1)));
                }
            };

            if capacity == 0 {
                relax((next, 0), cost + d, HopKind::Direct);
                continue;
            }

            if fuel >= edge.fuel {
                relax((next, fuel - edge.fuel), cost + d, HopKind::Direct);
            } else {
                relax(
                    (next, fuel.saturating_sub(1)),
                    cost + d + penalty,
                    HopKind::Drift,
                );
            }

            if can_refuel && fuel < capacity && capacity >= edge.fuel {
                relax(
                    (next, capacity - edge.fuel),
                    cost + d + planner.refuel_cost(fuel, capacity),
                    HopKind::Refuel,
                );
            }
        }
    }

    None
}

fn reconstruct(
    graph: &WaypointGraph,
    prev:  &FxHashMap<State, (State, HopKind)>,
    start: State,
    end:   State,
    cost:  u64,
) -> Route {
    let mut hops = Vec::new();
    let mut cur = end;
    while cur != start {
        let Some(&(before, kind)) = prev.get(&cur) else {
            break;
        };
        let edge = graph.edge(before.0, cur.0);
        hops.push(Hop {
            from:     graph.node(before.0).symbol.clone(),
            to:       graph.node(cur.0).symbol.clone(),
            kind,
            distance: edge.distance,
            fuel:     if kind == HopKind::Drift { 1 } else { edge.fuel },
        });
        cur = before;
    }
    hops.reverse();

    let mut waypoints = Vec::with_capacity(hops.len() + 1);
    waypoints.push(graph.node(start.0).symbol.clone());
    waypoints.extend(hops.iter().map(|h| h.to.clone()));

    Route { cost, waypoints, hops }
}
