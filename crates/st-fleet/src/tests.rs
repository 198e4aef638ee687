//! Unit tests for st-fleet.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use st_api::sim::{self, SimulatedClient};
    use st_api::{MARKETPLACE, TradeKind};
    use st_cache::InMemoryCache;
    use st_core::{ControlConfig, FleetConfig};

    use crate::{Fleet, FleetBuilder};

    pub const A: &str = "X1-F-A";
    pub const B: &str = "X1-F-B";

    pub fn world() -> Arc<SimulatedClient> {
        Arc::new(
            SimulatedClient::new()
                .with_travel_secs_per_unit(0.0)
                .with_waypoint(sim::waypoint(A, 0, 0, &[MARKETPLACE]))
                .with_waypoint(sim::waypoint(B, 10, 0, &[MARKETPLACE]))
                .with_waypoint(sim::waypoint("X1-Q-A", 0, 0, &[]))
                .with_market(sim::market(A, &[("FUEL", TradeKind::Exchange, 10, 5)]))
                .with_market(sim::market(B, &[("FUEL", TradeKind::Exchange, 10, 5)]))
                .with_ship(sim::ship("S-1", A, 100, 100, 40))
                .with_ship(sim::ship("S-2", B, 100, 100, 40)),
        )
    }

    /// Loops that wake every few milliseconds.
    pub fn fast_config() -> FleetConfig {
        FleetConfig {
            control: ControlConfig {
                idle_interval_ms:  5,
                min_sleep_ms:      1,
                max_sleep_ms:      10,
                startup_jitter_ms: 0,
            },
            ..FleetConfig::default()
        }
    }

    pub async fn fleet(sim: &Arc<SimulatedClient>, cache: &Arc<InMemoryCache>) -> Fleet {
        FleetBuilder::new(sim.clone(), cache.clone(), fast_config())
            .bootstrap()
            .await
            .unwrap()
            .build()
            .unwrap()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use std::sync::Arc;

    use st_cache::{InMemoryCache, MarketCache};
    use st_core::{FleetConfig, SystemSymbol};

    use super::helpers::*;
    use crate::{FleetBuilder, FleetError};

    #[tokio::test]
    async fn bootstrap_caches_fleet_and_ship_systems() {
        let sim = world();
        let cache = Arc::new(InMemoryCache::new());
        let fleet = fleet(&sim, &cache).await;

        assert_eq!(cache.fleet().unwrap().len(), 2);
        assert_eq!(cache.system_waypoints(&SystemSymbol::from("X1-F")).unwrap().len(), 2);
        assert!(cache.system_waypoints(&SystemSymbol::from("X1-Q")).unwrap().is_empty());
        assert_eq!(sim.count("list_waypoints"), 1);
        assert_eq!(sim.count("list_contracts"), 1);
        assert!(cache.contracts().unwrap().is_empty());
        assert!(fleet.contracts().is_empty());

        let symbols: Vec<String> = fleet.ships().iter().map(|s| s.symbol().to_string()).collect();
        assert_eq!(symbols, vec!["S-1", "S-2"]);
        assert!(fleet.ship("S-2").unwrap().is_at(B));
        assert!(fleet.ship("S-9").is_none());
    }

    #[tokio::test]
    async fn bootstrap_surfaces_remote_errors() {
        let sim = world();
        sim.fail_next(st_api::ApiError::Timeout);
        let cache = Arc::new(InMemoryCache::new());

        let err = FleetBuilder::new(sim.clone(), cache, FleetConfig::default())
            .bootstrap()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, FleetError::Api(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = FleetConfig::default();
        config.trade.max_units_per_trade = 0;
        let err = FleetBuilder::new(world(), Arc::new(InMemoryCache::new()), config)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, FleetError::Config(_)));
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use std::sync::Arc;
    use std::time::Duration;

    use st_agent::{IdleMission, MarketReconMission, Mission, Role};
    use st_cache::InMemoryCache;
    use st_core::{SystemSymbol, WaypointSymbol};

    use super::helpers::*;
    use crate::FleetError;

    #[tokio::test]
    async fn assign_unknown_ship_is_an_error() {
        let sim = world();
        let fleet = fleet(&sim, &Arc::new(InMemoryCache::new())).await;
        let mission: Arc<dyn Mission> = Arc::new(IdleMission::new(fleet.services().clone()));

        let err = fleet.assign(&mission, Role::Trader, "S-9").unwrap_err();
        assert!(matches!(err, FleetError::UnknownShip(s) if s == "S-9"));

        fleet.assign(&mission, Role::Trader, "S-1").unwrap();
        assert!(fleet.ship("S-1").unwrap().mission().is_some());
        assert!(fleet.ship("S-2").unwrap().mission().is_none());
    }

    #[tokio::test]
    async fn reassigning_moves_ship_between_rosters() {
        let sim = world();
        let fleet = fleet(&sim, &Arc::new(InMemoryCache::new())).await;
        let recon: Arc<dyn Mission> = Arc::new(MarketReconMission::new(
            fleet.services().clone(),
            vec![WaypointSymbol::from(A)],
        ));
        let idle: Arc<dyn Mission> = Arc::new(IdleMission::new(fleet.services().clone()));

        fleet.assign(&recon, Role::Satellite, "S-1").unwrap();
        fleet.assign(&idle, Role::Hauler, "S-1").unwrap();

        assert!(recon.roster().is_empty());
        assert_eq!(idle.roster().len(), 1);
    }

    #[tokio::test]
    async fn loops_run_until_shutdown() {
        let sim = world();
        let cache = Arc::new(InMemoryCache::new());
        let mut fleet = fleet(&sim, &cache).await;
        let mission: Arc<dyn Mission> = Arc::new(MarketReconMission::new(
            fleet.services().clone(),
            vec![WaypointSymbol::from(A)],
        ));
        fleet.assign(&mission, Role::Satellite, "S-1").unwrap();

        fleet.start();
        assert!(fleet.is_running());
        fleet.start();
        assert_eq!(fleet.tasks.len(), 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        tokio::time::timeout(Duration::from_secs(5), fleet.shutdown())
            .await
            .unwrap()
            .unwrap();

        assert!(sim.count("get_market") >= 1);
        assert_eq!(cache.market_count(), 1);
    }

    #[tokio::test]
    async fn shutdown_without_start_is_ok() {
        let sim = world();
        let fleet = fleet(&sim, &Arc::new(InMemoryCache::new())).await;
        assert!(!fleet.is_running());
        fleet.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn recon_for_bootstrapped_system() {
        let sim = world();
        let cache = Arc::new(InMemoryCache::new());
        let fleet = fleet(&sim, &cache).await;

        let recon =
            MarketReconMission::for_system(fleet.services().clone(), &SystemSymbol::from("X1-F"))
                .unwrap();
        assert_eq!(recon.markets(), &[WaypointSymbol::from(A), WaypointSymbol::from(B)]);
    }
}
