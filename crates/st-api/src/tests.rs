//! Unit tests for st-api.

#[cfg(test)]
mod cargo {
    use st_core::TradeSymbol;

    use crate::Cargo;

    #[test]
    fn add_merges_stacks() {
        let mut c = Cargo { capacity: 40, ..Cargo::default() };
        let ore = TradeSymbol::from("IRON_ORE");
        c.add(&ore, 5);
        c.add(&ore, 7);
        assert_eq!(c.inventory.len(), 1);
        assert_eq!(c.units_of("IRON_ORE"), 12);
        assert_eq!(c.units, 12);
        assert_eq!(c.free(), 28);
    }

    #[test]
    fn remove_is_capped_and_drops_empty_stacks() {
        let mut c = Cargo { capacity: 40, ..Cargo::default() };
        c.add(&TradeSymbol::from("ICE_WATER"), 3);
        assert_eq!(c.remove("ICE_WATER", 10), 3);
        assert!(c.is_empty());
        assert!(c.inventory.is_empty());
        assert_eq!(c.remove("ICE_WATER", 1), 0);
    }
}

#[cfg(test)]
mod wire {
    use crate::{ContractData, Market, NavStatus, ShipSnapshot, TradeKind};

    #[test]
    fn ship_snapshot_from_camel_case() {
        let json = r#"{
            "symbol": "BWIGGS-1",
            "nav": {
                "systemSymbol": "X1-DF55",
                "waypointSymbol": "X1-DF55-A1",
                "route": {
                    "origin": "X1-DF55-B2",
                    "destination": "X1-DF55-A1",
                    "departureTime": "2024-01-01T00:00:00Z",
                    "arrival": "2024-01-01T00:01:00Z"
                },
                "status": "IN_TRANSIT",
                "flightMode": "DRIFT"
            },
            "fuel": { "current": 10, "capacity": 400 },
            "cargo": { "capacity": 40, "units": 2,
                       "inventory": [ { "symbol": "IRON_ORE", "units": 2 } ] }
        }"#;
        let ship: ShipSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(ship.nav.status, NavStatus::InTransit);
        assert_eq!(ship.nav.route.destination, "X1-DF55-A1");
        assert_eq!(ship.cargo.units_of("IRON_ORE"), 2);
        assert_eq!(ship.cooldown.remaining_seconds, 0);
    }

    #[test]
    fn market_buys_imports_and_exchanges() {
        let json = r#"{
            "symbol": "X1-DF55-A1",
            "imports": [ "FUEL" ],
            "exchange": [ "ICE_WATER" ],
            "tradeGoods": [
                { "symbol": "IRON", "type": "EXPORT", "tradeVolume": 10,
                  "purchasePrice": 50, "sellPrice": 40 }
            ]
        }"#;
        let m: Market = serde_json::from_str(json).unwrap();
        assert!(m.buys("FUEL"));
        assert!(m.buys("ICE_WATER"));
        assert!(!m.buys("IRON"));
        assert_eq!(m.trade_good("IRON").unwrap().kind, TradeKind::Export);
        assert_eq!(m.trade_volume("IRON"), 10);
        assert_eq!(m.trade_volume("GOLD"), 0);
    }

    #[test]
    fn contract_from_camel_case() {
        let json = r#"{
            "id": "c1", "factionSymbol": "COSMIC", "type": "PROCUREMENT",
            "terms": {
                "deadline": "2024-02-01T00:00:00Z",
                "payment": { "onAccepted": 1000, "onFulfilled": 5000 },
                "deliver": [ { "tradeSymbol": "COPPER_ORE", "destinationSymbol": "X1-A-1",
                               "unitsRequired": 30, "unitsFulfilled": 12 } ]
            },
            "accepted": true, "fulfilled": false,
            "deadlineToAccept": null
        }"#;
        let c: ContractData = serde_json::from_str(json).unwrap();
        assert_eq!(c.terms.deliver[0].remaining(), 18);
        assert_eq!(c.terms.payment.on_fulfilled, 5000);
    }
}

#[cfg(all(test, feature = "sim"))]
mod sim {
    use st_core::{FlightMode, ShipSymbol, TradeSymbol, WaypointSymbol};

    use crate::sim::{market, ship, waypoint};
    use crate::{ApiClient, ApiError, MARKETPLACE, NavStatus, Shipyard, SimulatedClient, TradeKind};

    fn world() -> SimulatedClient {
        SimulatedClient::new()
            .with_waypoint(waypoint("X1-A-HOME", 0, 0, &[MARKETPLACE]))
            .with_waypoint(waypoint("X1-A-FAR", 30, 40, &[]))
            .with_market(market("X1-A-HOME", &[("FUEL", TradeKind::Exchange, 100, 72)]))
            .with_ship(ship("S-1", "X1-A-HOME", 100, 100, 20))
    }

    #[tokio::test]
    async fn navigate_burns_fuel_and_sets_arrival() {
        let sim = world();
        let s = ShipSymbol::from("S-1");
        let res = sim.navigate(&s, &WaypointSymbol::from("X1-A-FAR")).await.unwrap();
        assert_eq!(res.fuel.current, 50);
        assert_eq!(res.nav.status, NavStatus::InTransit);
        assert!(res.nav.route.arrival > res.nav.route.departure_time);

        sim.finish_transits();
        let snap = sim.get_ship(&s).await.unwrap();
        assert_eq!(snap.nav.status, NavStatus::InOrbit);
    }

    #[tokio::test]
    async fn navigate_rejects_when_docked_or_short_on_fuel() {
        let sim = world();
        let s = ShipSymbol::from("S-1");
        sim.dock(&s).await.unwrap();
        let err = sim.navigate(&s, &WaypointSymbol::from("X1-A-FAR")).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { .. }));

        sim.orbit(&s).await.unwrap();
        let mut low = sim.ship("S-1").unwrap();
        low.fuel.current = 10;
        sim.set_ship(low);
        let err = sim.navigate(&s, &WaypointSymbol::from("X1-A-FAR")).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected { code: 4203, .. }));

        sim.set_flight_mode(&s, FlightMode::Drift).await.unwrap();
        let res = sim.navigate(&s, &WaypointSymbol::from("X1-A-FAR")).await.unwrap();
        assert_eq!(res.fuel.current, 9);
    }

    #[tokio::test]
    async fn injected_failures_are_fifo_and_logged() {
        let sim = world();
        sim.fail_next(ApiError::Timeout);
        let s = ShipSymbol::from("S-1");
        assert_eq!(sim.dock(&s).await.unwrap_err(), ApiError::Timeout);
        assert!(sim.dock(&s).await.is_ok());
        assert_eq!(sim.count("dock"), 2);
    }

    #[tokio::test]
    async fn systems_follow_registered_waypoints() {
        let sim = world().with_waypoint(waypoint("X1-B-1", 5, 5, &[]));
        let systems = sim.list_systems().await.unwrap();
        let symbols: Vec<String> = systems.iter().map(|s| s.symbol.to_string()).collect();
        assert_eq!(symbols, vec!["X1-A", "X1-B"]);
    }

    #[tokio::test]
    async fn shipyards_only_where_listed() {
        let sim = world().with_shipyard(Shipyard {
            symbol:     WaypointSymbol::from("X1-A-HOME"),
            ship_types: vec!["SHIP_PROBE".to_owned()],
        });
        let yard = sim.get_shipyard(&WaypointSymbol::from("X1-A-HOME")).await.unwrap();
        assert_eq!(yard.ship_types, vec!["SHIP_PROBE"]);

        let err = sim.get_shipyard(&WaypointSymbol::from("X1-A-FAR")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { kind: "shipyard", .. }));
        assert!(!err.is_transient());
        assert!(ApiError::Timeout.is_transient());
    }

    #[tokio::test]
    async fn transfer_moves_units_between_colocated_ships() {
        let sim = world().with_ship(ship("S-2", "X1-A-HOME", 0, 0, 10));
        let mut sender = sim.ship("S-1").unwrap();
        sender.cargo.add(&TradeSymbol::from("IRON_ORE"), 6);
        sim.set_ship(sender);

        let cargo = sim
            .transfer_cargo(
                &ShipSymbol::from("S-1"),
                &ShipSymbol::from("S-2"),
                &TradeSymbol::from("IRON_ORE"),
                4,
            )
            .await
            .unwrap();
        assert_eq!(cargo.units_of("IRON_ORE"), 2);
        assert_eq!(sim.ship("S-2").unwrap().cargo.units_of("IRON_ORE"), 4);
    }
}
