//! `st-fleet` — wires ships, missions and collaborators into a running fleet.
//!
//! # Lifecycle
//!
//! ```text
//! FleetBuilder::new(client, cache, config)
//!     .bootstrap().await?   ① list ships, upsert fleet + system waypoints + contracts
//!     .build()?             ② validate config, wrap every snapshot in a Ship
//! fleet.assign(&mission, role, "SHIP-1")?   ③ any number of times
//! fleet.start();                            ④ one control loop per ship
//! fleet.shutdown().await?;                  ⑤ flip the watch channel, join every loop
//! ```
//!
//! Missions stay owned by the caller; a ship whose mission is dropped goes
//! idle on its next pass.

pub mod builder;
pub mod error;
pub mod fleet;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use error::{FleetError, FleetResult};
pub use fleet::Fleet;
