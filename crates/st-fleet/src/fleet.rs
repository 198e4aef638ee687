//! The running fleet: ship lookup, mission assignment, task lifecycle.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use st_agent::{Mission, Role, Services, Ship};
use st_api::ContractData;
use st_core::ShipSymbol;

use crate::{FleetError, FleetResult};

/// Build with [`FleetBuilder`](crate::FleetBuilder).
pub struct Fleet {
    pub(crate) services:  Services,
    pub(crate) ships:     BTreeMap<ShipSymbol, Arc<Ship>>,
    pub(crate) contracts: Vec<ContractData>,
    pub(crate) shutdown:  watch::Sender<bool>,
    pub(crate) tasks:     JoinSet<()>,
}

impl Fleet {
    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn ship(&self, symbol: &str) -> Option<Arc<Ship>> {
        self.ships.get(symbol).cloned()
    }

    /// Every ship, ordered by symbol.
    pub fn ships(&self) -> Vec<Arc<Ship>> {
        self.ships.values().cloned().collect()
    }

    /// Contracts known at bootstrap.
    pub fn contracts(&self) -> &[ContractData] {
        &self.contracts
    }

    /// Put ship `symbol` on `mission` as `role`.  Takes effect on the ship's
    /// next pass.
    pub fn assign(&self, mission: &Arc<dyn Mission>, role: Role, symbol: &str) -> FleetResult<()> {
        let ship = self
            .ships
            .get(symbol)
            .ok_or_else(|| FleetError::UnknownShip(ShipSymbol::from(symbol)))?;
        st_agent::assign(mission, role, ship);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Spawn one control loop per ship on the current tokio runtime.
    /// Calling it again while running does nothing.
    pub fn start(&mut self) {
        if self.is_running() {
            warn!("fleet already started");
            return;
        }
        let config = self.services.config.clone();
        for ship in self.ships.values() {
            let rx = self.shutdown.subscribe();
            self.tasks.spawn(ship.clone().run(config.clone(), rx));
        }
        info!(ships = self.tasks.len(), "fleet started");
    }

    /// Signal every loop to stop and wait for all of them.
    ///
    /// Returns the first task failure, after every task has been joined.
    pub async fn shutdown(mut self) -> FleetResult<()> {
        // No subscribers just means nothing was started.
        let _ = self.shutdown.send(true);

        let mut first_err = None;
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "control loop ended abnormally");
                first_err.get_or_insert(FleetError::Task(e.to_string()));
            }
        }
        info!("fleet stopped");
        first_err.map_or(Ok(()), Err)
    }
}
