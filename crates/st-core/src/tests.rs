//! Unit tests for st-core primitives.

#[cfg(test)]
mod symbols {
    use std::collections::HashMap;

    use crate::{SystemSymbol, WaypointSymbol};

    #[test]
    fn waypoint_system_prefix() {
        let wp = WaypointSymbol::from("X1-DF55-20250Z");
        assert_eq!(wp.system(), SystemSymbol::from("X1-DF55"));
    }

    #[test]
    fn malformed_waypoint_is_its_own_system() {
        let wp = WaypointSymbol::from("LONELY");
        assert_eq!(wp.system().as_str(), "LONELY");
    }

    #[test]
    fn borrow_as_str_for_map_lookup() {
        let mut m = HashMap::new();
        m.insert(WaypointSymbol::from("X1-A-1"), 3);
        assert_eq!(m.get("X1-A-1"), Some(&3));
    }

    #[test]
    fn serializes_as_bare_string() {
        let wp = WaypointSymbol::from("X1-A-1");
        assert_eq!(serde_json::to_string(&wp).unwrap(), "\"X1-A-1\"");
    }
}

#[cfg(test)]
mod geo {
    use crate::Coord;

    #[test]
    fn zero_distance() {
        let p = Coord::new(4, -7);
        assert_eq!(p.distance(p), 0);
    }

    #[test]
    fn truncates_toward_zero() {
        // sqrt(2) ≈ 1.414
        assert_eq!(Coord::new(0, 0).distance(Coord::new(1, 1)), 1);
        assert_eq!(Coord::new(0, 0).distance(Coord::new(3, 4)), 5);
        // sqrt(50) ≈ 7.07
        assert_eq!(Coord::new(-5, -5).distance(Coord::new(0, 0)), 7);
    }
}

#[cfg(test)]
mod flight {
    use crate::{CoreError, FlightMode};

    #[test]
    fn fuel_rule() {
        assert_eq!(FlightMode::Cruise.fuel_cost(0), 1);
        assert_eq!(FlightMode::Cruise.fuel_cost(40), 40);
        assert_eq!(FlightMode::Stealth.fuel_cost(40), 40);
        assert_eq!(FlightMode::Burn.fuel_cost(0), 2);
        assert_eq!(FlightMode::Burn.fuel_cost(40), 80);
        assert_eq!(FlightMode::Drift.fuel_cost(400), 1);
    }

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!("burn".parse::<FlightMode>().unwrap(), FlightMode::Burn);
        assert_eq!("DRIFT".parse::<FlightMode>().unwrap(), FlightMode::Drift);
        assert!(matches!(
            "WARP".parse::<FlightMode>(),
            Err(CoreError::UnknownFlightMode(m)) if m == "WARP"
        ));
    }

    #[test]
    fn wire_format() {
        let json = serde_json::to_string(&FlightMode::Stealth).unwrap();
        assert_eq!(json, "\"STEALTH\"");
        let back: FlightMode = serde_json::from_str("\"CRUISE\"").unwrap();
        assert_eq!(back, FlightMode::Cruise);
    }
}

#[cfg(test)]
mod time {
    use chrono::{Duration, Utc};

    use crate::remaining;

    #[test]
    fn future_deadline() {
        let now = Utc::now();
        let left = remaining(now, now + Duration::seconds(30)).unwrap();
        assert_eq!(left.as_secs(), 30);
    }

    #[test]
    fn past_or_present_deadline() {
        let now = Utc::now();
        assert!(remaining(now, now).is_none());
        assert!(remaining(now, now - Duration::seconds(1)).is_none());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, FleetConfig, MissingMarketPolicy};

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = FleetConfig::from_json("{}").unwrap();
        assert_eq!(cfg, FleetConfig::default());
        assert_eq!(cfg.planner.drift_penalty, 10_000);
        assert_eq!(cfg.planner.fuel_price_per_block, 72);
        assert_eq!(cfg.contract.missing_market, MissingMarketPolicy::Fail);
    }

    #[test]
    fn partial_override() {
        let cfg = FleetConfig::from_json(
            r#"{ "planner": { "drift_penalty": 50 }, "contract": { "missing_market": "retry" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.planner.drift_penalty, 50);
        assert_eq!(cfg.planner.fuel_block_units, 100);
        assert_eq!(cfg.contract.missing_market, MissingMarketPolicy::Retry);
    }

    #[test]
    fn rejects_inverted_sleep_bounds() {
        let err = FleetConfig::from_json(
            r#"{ "control": { "min_sleep_ms": 10, "max_sleep_ms": 5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(FleetConfig::from_json("{"), Err(CoreError::Parse(_))));
    }
}
