//! Complete waypoint graph for one system.
//!
//! # Data layout
//!
//! Every pair of distinct waypoints is connected, so edges are stored as two
//! dense `n × n` row-major matrices (`distance`, `fuel`) rather than an
//! adjacency list.  Systems hold tens of waypoints, so the matrices stay
//! small and the planner's inner loop is a contiguous row scan.
//!
//! Fuel per edge is fixed at build time from the flight mode the graph was
//! built for.

use rustc_hash::FxHashMap;

use st_api::{MARKETPLACE, Waypoint};
use st_core::{Coord, FlightMode, WaypointSymbol};

// ── GraphNode ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub symbol:     WaypointSymbol,
    pub coord:      Coord,
    /// Fuel can be bought here.
    pub can_refuel: bool,
}

/// One directed edge of the complete graph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub distance: u32,
    pub fuel:     u32,
}

// ── WaypointGraph ─────────────────────────────────────────────────────────────

/// Do not construct directly; use [`WaypointGraphBuilder`] or
/// [`WaypointGraph::from_waypoints`].
#[derive(Clone, Debug)]
pub struct WaypointGraph {
    nodes:    Vec<GraphNode>,
    index:    FxHashMap<WaypointSymbol, usize>,
    mode:     FlightMode,
    distance: Vec<u32>,
    fuel:     Vec<u32>,
}

impl WaypointGraph {
    /// Build from cached waypoints.  A waypoint can refuel if it carries the
    /// `MARKETPLACE` trait.
    pub fn from_waypoints(waypoints: &[Waypoint], mode: FlightMode) -> Self {
        let mut b = WaypointGraphBuilder::new();
        for wp in waypoints {
            b.add_node(wp.symbol.clone(), wp.coord(), wp.has_trait(MARKETPLACE));
        }
        b.build(mode)
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn mode(&self) -> FlightMode {
        self.mode
    }

    pub fn index_of(&self, symbol: &str) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    #[inline]
    pub fn node(&self, i: usize) -> &GraphNode {
        &self.nodes[i]
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Edge `from → to`.  `from == to` yields a zero-distance edge.
    #[inline]
    pub fn edge(&self, from: usize, to: usize) -> Edge {
        let k = from * self.nodes.len() + to;
        Edge { distance: self.distance[k], fuel: self.fuel[k] }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Collects nodes, then materialises every pairwise edge on [`build`][Self::build].
#[derive(Default)]
pub struct WaypointGraphBuilder {
    nodes: Vec<GraphNode>,
    index: FxHashMap<WaypointSymbol, usize>,
}

impl WaypointGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waypoint and return its node index.  Adding a symbol twice
    /// replaces the earlier entry in place.
    pub fn add_node(
        &mut self,
        symbol:     impl Into<WaypointSymbol>,
        coord:      Coord,
        can_refuel: bool,
    ) -> usize {
        let symbol = symbol.into();
        if let Some(&i) = self.index.get(&symbol) {
            self.nodes[i] = GraphNode { symbol, coord, can_refuel };
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(symbol.clone(), i);
        self.nodes.push(GraphNode { symbol, coord, can_refuel });
        i
    }

    pub fn build(self, mode: FlightMode) -> WaypointGraph {
        let n = self.nodes.len();
        let mut distance = vec![0u32; n * n];
        let mut fuel     = vec![0u32; n * n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = self.nodes[i].coord.distance(self.nodes[j].coord);
                distance[i * n + j] = d;
                fuel[i * n + j]     = mode.fuel_cost(d);
            }
        }

        WaypointGraph { nodes: self.nodes, index: self.index, mode, distance, fuel }
    }
}
