//! Fluent builder for a [`Fleet`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::info;

use st_agent::{Services, Ship};
use st_api::{ApiClient, ContractData, ShipSnapshot};
use st_cache::MarketCache;
use st_core::{FleetConfig, SystemSymbol};
use st_routing::RoutePlanner;

use crate::{Fleet, FleetResult};

/// # Required inputs
///
/// - `Arc<dyn ApiClient>`: the remote API (or `SimulatedClient`)
/// - `Arc<dyn MarketCache>`: read by leaves, written by scans
/// - [`FleetConfig`]
///
/// # Optional inputs
///
/// | Method           | Default                                   |
/// |------------------|-------------------------------------------|
/// | `.planner(p)`    | `FuelPlanner` from `config.planner`       |
/// | `.ships(v)`      | none; call [`bootstrap`](Self::bootstrap) |
/// | `.contracts(v)`  | none; filled by `bootstrap`               |
pub struct FleetBuilder {
    client:    Arc<dyn ApiClient>,
    cache:     Arc<dyn MarketCache>,
    config:    FleetConfig,
    planner:   Option<Arc<dyn RoutePlanner>>,
    snapshots: Vec<ShipSnapshot>,
    contracts: Vec<ContractData>,
}

impl FleetBuilder {
    pub fn new(client: Arc<dyn ApiClient>, cache: Arc<dyn MarketCache>, config: FleetConfig) -> Self {
        Self {
            client,
            cache,
            config,
            planner:   None,
            snapshots: Vec::new(),
            contracts: Vec::new(),
        }
    }

    pub fn planner(mut self, planner: Arc<dyn RoutePlanner>) -> Self {
        self.planner = Some(planner);
        self
    }

    /// Seed ships directly instead of listing them remotely.
    pub fn ships(mut self, snapshots: Vec<ShipSnapshot>) -> Self {
        self.snapshots = snapshots;
        self
    }

    pub fn contracts(mut self, contracts: Vec<ContractData>) -> Self {
        self.contracts = contracts;
        self
    }

    /// Pull the fleet, the waypoints of every system a ship is in, and the
    /// agent's contracts, and write them all to the cache.
    pub async fn bootstrap(mut self) -> FleetResult<Self> {
        let ships = self.client.list_ships().await?;
        self.cache.upsert_fleet(&ships)?;

        let systems: BTreeSet<SystemSymbol> =
            ships.iter().map(|s| s.nav.system_symbol.clone()).collect();
        for system in &systems {
            let waypoints = self.client.list_waypoints(system).await?;
            self.cache.upsert_waypoints(&waypoints)?;
            info!(%system, waypoints = waypoints.len(), "system cached");
        }

        let contracts = self.client.list_contracts().await?;
        self.cache.upsert_contracts(&contracts)?;

        info!(ships = ships.len(), systems = systems.len(), contracts = contracts.len(), "bootstrapped");
        self.snapshots = ships;
        self.contracts = contracts;
        Ok(self)
    }

    /// Validate the config and wrap every snapshot in a [`Ship`].
    pub fn build(self) -> FleetResult<Fleet> {
        self.config.validate()?;

        let mut services = Services::new(self.cache, Arc::new(self.config));
        if let Some(planner) = self.planner {
            services = services.with_planner(planner);
        }

        let ships: BTreeMap<_, _> = self
            .snapshots
            .into_iter()
            .map(|s| (s.symbol.clone(), Arc::new(Ship::new(s, self.client.clone()))))
            .collect();

        let (shutdown, _) = watch::channel(false);
        Ok(Fleet {
            services,
            ships,
            contracts: self.contracts,
            shutdown,
            tasks: JoinSet::new(),
        })
    }
}
