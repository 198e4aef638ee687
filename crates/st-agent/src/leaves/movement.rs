//! Docking, refuelling and flying.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use st_api::MARKETPLACE;
use st_behavior::Status;
use st_core::FlightMode;
use st_routing::{FuelGauge, HopKind, WaypointGraph};

use super::Leaf;
use crate::Blackboard;
use crate::error::LeafResult;

/// Top off the tank where fuel is sold.
///
/// `Success` without a remote call when the tank is full, the ship burns no
/// fuel, or the current waypoint has no marketplace.
pub struct Refuel;

#[async_trait]
impl Leaf for Refuel {
    const NAME: &'static str = "Refuel";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        if bb.ship.is_fuel_full() {
            return Ok(Status::Success);
        }
        if bb.ship.in_transit() {
            return Ok(Status::Running);
        }
        let at = bb.ship.at();
        if !bb.cache.waypoint_has_trait(&at, MARKETPLACE)? {
            debug!(waypoint = %at, "no fuel for sale; skipping refuel");
            return Ok(Status::Success);
        }
        bb.ship.refuel().await?;
        Ok(Status::Success)
    }
}

pub struct Orbit;

#[async_trait]
impl Leaf for Orbit {
    const NAME: &'static str = "Orbit";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.ship.orbit().await?;
        Ok(Status::Success)
    }
}

pub struct Dock;

#[async_trait]
impl Leaf for Dock {
    const NAME: &'static str = "Dock";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        bb.ship.dock().await?;
        Ok(Status::Success)
    }
}

/// Fly one hop of a fuel-aware route towards `destination`.
///
/// | Situation                                    | Status    |
/// |----------------------------------------------|-----------|
/// | at destination, arrived                      | `Success` |
/// | in flight                                    | `Running` |
/// | no cached waypoints for the system           | `Running` |
/// | planner cannot solve the graph               | `Failure` |
/// | hop started, arrival pending or intermediate | `Running` |
/// | final hop already landed                     | `Success` |
///
/// Drift hops switch the ship to `DRIFT` for that hop only; the next
/// non-drift hop restores the graph's mode.
pub struct Navigate;

#[async_trait]
impl Leaf for Navigate {
    const NAME: &'static str = "Navigate";

    async fn run(&self, bb: &mut Blackboard) -> LeafResult {
        let dest = bb.require_destination()?.clone();
        let ship = bb.ship.clone();

        if ship.in_transit() {
            return Ok(Status::Running);
        }
        let origin = ship.at();
        if origin == dest {
            return Ok(Status::Success);
        }

        let waypoints = bb.cache.system_waypoints(&ship.system())?;
        if waypoints.is_empty() {
            warn!(system = %ship.system(), "no cached waypoints; cannot plan");
            return Ok(Status::Running);
        }

        let mode = match ship.flight_mode() {
            FlightMode::Drift => FlightMode::Cruise,
            m => m,
        };
        let graph = WaypointGraph::from_waypoints(&waypoints, mode);
        let fuel = ship.fuel();
        let gauge = FuelGauge { current: fuel.current, capacity: fuel.capacity };
        let route = bb.planner.plan(&graph, &origin, &dest, gauge)?;

        let Some(hop) = route.next_hop() else {
            return Ok(Status::Success);
        };
        info!(
            to = %hop.to,
            destination = %dest,
            kind = ?hop.kind,
            hops = route.hops.len(),
            cost = route.cost,
            "flying hop",
        );

        match hop.kind {
            HopKind::Drift => ship.set_flight_mode(FlightMode::Drift).await?,
            HopKind::Refuel => {
                ship.refuel().await?;
                ship.set_flight_mode(mode).await?;
            }
            HopKind::Direct => ship.set_flight_mode(mode).await?,
        }
        let next = hop.to.clone();
        ship.navigate(&next).await?;

        if next == dest && !ship.in_transit() {
            return Ok(Status::Success);
        }
        Ok(Status::Running)
    }
}
