//! `st-cache` — the persistence cache as seen by the fleet controller.
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`cache`]  | [`MarketCache`] trait, [`InMemoryCache`], `MarketTrade` |
//! | [`loader`] | CSV waypoint loader                                   |
//! | [`error`]  | `CacheError`, `CacheResult`                           |
//!
//! Durable back-ends (SQL, key-value) implement [`MarketCache`] outside this
//! workspace.

pub mod cache;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use cache::{InMemoryCache, MarketCache, MarketTrade};
pub use error::{CacheError, CacheResult};
pub use loader::{load_waypoints_csv, load_waypoints_reader};
