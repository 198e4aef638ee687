//! Unit tests for st-cache.

#[cfg(test)]
mod helpers {
    use st_api::{Market, TradeGood, TradeKind};
    use st_core::{TradeSymbol, WaypointSymbol};

    /// A market from `(good, kind, purchase_price, sell_price)` rows.
    pub fn market(at: &str, goods: &[(&str, TradeKind, u32, u32)]) -> Market {
        let mut m = Market { symbol: WaypointSymbol::from(at), ..Market::default() };
        for &(good, kind, purchase_price, sell_price) in goods {
            let symbol = TradeSymbol::from(good);
            match kind {
                TradeKind::Export => m.exports.push(symbol.clone()),
                TradeKind::Import => m.imports.push(symbol.clone()),
                TradeKind::Exchange => m.exchange.push(symbol.clone()),
            }
            m.trade_goods.push(TradeGood {
                symbol,
                kind,
                trade_volume: 10,
                purchase_price,
                sell_price,
            });
        }
        m
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use std::io::Cursor;

    use st_api::Shipyard;
    use st_api::TradeKind::{Exchange, Export, Import};
    use st_core::{SystemSymbol, TradeSymbol, WaypointSymbol};

    use super::helpers::market;
    use crate::{InMemoryCache, MarketCache, load_waypoints_reader};

    fn cache() -> InMemoryCache {
        InMemoryCache::new()
            .with_market(market("X1-A-1", &[("IRON", Import, 0, 120), ("COPPER", Import, 0, 95)]))
            .with_market(market("X1-A-2", &[("IRON", Exchange, 60, 55)]))
            .with_market(market("X1-A-3", &[("IRON", Export, 40, 30), ("COPPER", Export, 10, 5)]))
            .with_market(market("X1-A-4", &[("COPPER", Export, 8, 4)]))
    }

    #[test]
    fn importing_ranks_by_goods_accepted() {
        let goods = [TradeSymbol::from("IRON"), TradeSymbol::from("COPPER")];
        let got = cache().markets_importing(&goods).unwrap();
        assert_eq!(got, vec![WaypointSymbol::from("X1-A-1"), WaypointSymbol::from("X1-A-2")]);
    }

    #[test]
    fn importing_nothing_is_empty_not_error() {
        let got = cache().markets_importing(&[TradeSymbol::from("GOLD")]).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn exporters_cheapest_first() {
        let got = cache().export_waypoints_for_good("IRON").unwrap();
        assert_eq!(got, vec![WaypointSymbol::from("X1-A-3"), WaypointSymbol::from("X1-A-2")]);
        let got = cache().export_waypoints_for_good("COPPER").unwrap();
        assert_eq!(got[0], "X1-A-4");
    }

    #[test]
    fn trades_filtered_by_gross_and_sorted() {
        let trades = cache().market_trades(20).unwrap();
        // COPPER 4→1: 95-8 = 87; COPPER 3→1: 85; IRON 3→1: 120-40 = 80;
        // IRON 2→1: 60; IRON 3→2: 55-40 = 15 is filtered out.
        let gross: Vec<i64> = trades.iter().map(|t| t.gross()).collect();
        assert_eq!(gross, vec![87, 85, 80, 60]);
        assert_eq!(trades[0].source, "X1-A-4");
        assert_eq!(trades[0].buyer, "X1-A-1");
        assert!(trades.iter().all(|t| t.source != t.buyer));
    }

    #[test]
    fn market_sells_checks_cached_listing() {
        let c = cache();
        assert!(c.market_sells(&WaypointSymbol::from("X1-A-3"), "IRON").unwrap());
        assert!(!c.market_sells(&WaypointSymbol::from("X1-A-1"), "IRON").unwrap());
        assert!(!c.market_sells(&WaypointSymbol::from("X1-Z-9"), "IRON").unwrap());
    }

    #[test]
    fn waypoints_by_system_and_trait() {
        let csv = "symbol,type,x,y,traits\n\
                   X1-A-1,PLANET,0,0,MARKETPLACE;SHIPYARD\n\
                   X1-A-2,MOON,3,4,\n\
                   X1-B-1,PLANET,9,9,MARKETPLACE\n";
        let wps = load_waypoints_reader(Cursor::new(csv)).unwrap();
        let c = InMemoryCache::new();
        c.upsert_waypoints(&wps).unwrap();

        let a = c.system_waypoints(&SystemSymbol::from("X1-A")).unwrap();
        assert_eq!(a.len(), 2);
        assert!(c.waypoint_has_trait(&WaypointSymbol::from("X1-A-1"), "SHIPYARD").unwrap());
        assert!(!c.waypoint_has_trait(&WaypointSymbol::from("X1-A-2"), "MARKETPLACE").unwrap());
        assert!(!c.waypoint_has_trait(&WaypointSymbol::from("X1-Q-1"), "MARKETPLACE").unwrap());
    }

    #[test]
    fn upsert_replaces_wholesale() {
        let c = cache();
        c.upsert_market(&market("X1-A-1", &[("GOLD", Import, 0, 500)])).unwrap();
        let m = c.market(&WaypointSymbol::from("X1-A-1")).unwrap().unwrap();
        assert_eq!(m.trade_goods.len(), 1);
        assert_eq!(c.market_count(), 4);
    }

    #[test]
    fn shipyards_are_cached_by_waypoint() {
        let c = cache();
        let at = WaypointSymbol::from("X1-A-2");
        assert!(c.shipyard(&at).unwrap().is_none());

        let yard = Shipyard { symbol: at.clone(), ship_types: vec!["SHIP_MINING_DRONE".to_owned()] };
        c.upsert_shipyard(&yard).unwrap();
        assert_eq!(c.shipyard(&at).unwrap(), Some(yard));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{CacheError, load_waypoints_reader};

    #[test]
    fn parses_traits_and_system() {
        let csv = "symbol,type,x,y,traits\nX1-DF55-A1,PLANET,-3,7, MARKETPLACE ; SHIPYARD \n";
        let wps = load_waypoints_reader(Cursor::new(csv)).unwrap();
        assert_eq!(wps.len(), 1);
        assert_eq!(wps[0].system_symbol, "X1-DF55");
        assert_eq!(wps[0].traits, vec!["MARKETPLACE", "SHIPYARD"]);
        assert_eq!((wps[0].x, wps[0].y), (-3, 7));
    }

    #[test]
    fn bad_coordinate_is_parse_error() {
        let csv = "symbol,type,x,y,traits\nX1-A-1,PLANET,north,7,\n";
        let err = load_waypoints_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, CacheError::Parse(_)));
    }
}
