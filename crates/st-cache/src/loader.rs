//! CSV waypoint loader.
//!
//! # CSV format
//!
//! One row per waypoint.  The system is derived from the waypoint symbol.
//!
//! ```csv
//! symbol,type,x,y,traits
//! X1-DF55-A1,PLANET,0,0,MARKETPLACE;SHIPYARD
//! X1-DF55-B2,ASTEROID_FIELD,30,40,
//! ```
//!
//! **`traits`** is a `;`-separated list and may be empty.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use st_api::Waypoint;
use st_core::WaypointSymbol;

use crate::{CacheError, CacheResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    symbol: String,
    #[serde(rename = "type")]
    kind:   String,
    x:      i32,
    y:      i32,
    #[serde(default)]
    traits: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load waypoints from a CSV file.
pub fn load_waypoints_csv(path: &Path) -> CacheResult<Vec<Waypoint>> {
    let file = std::fs::File::open(path)?;
    load_waypoints_reader(file)
}

/// Like [`load_waypoints_csv`] but accepts any `Read` source.
pub fn load_waypoints_reader<R: Read>(reader: R) -> CacheResult<Vec<Waypoint>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut waypoints = Vec::new();

    for result in csv_reader.deserialize::<WaypointRecord>() {
        let row = result.map_err(|e| CacheError::Parse(e.to_string()))?;
        let symbol = row.symbol.trim();
        if symbol.is_empty() {
            return Err(CacheError::Parse("waypoint row with empty symbol".into()));
        }
        let symbol = WaypointSymbol::from(symbol);
        waypoints.push(Waypoint {
            system_symbol: symbol.system(),
            symbol,
            kind:   row.kind,
            x:      row.x,
            y:      row.y,
            traits: parse_traits(&row.traits),
        });
    }

    debug!(count = waypoints.len(), "loaded waypoints");
    Ok(waypoints)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_traits(s: &str) -> Vec<String> {
    s.split(';')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
