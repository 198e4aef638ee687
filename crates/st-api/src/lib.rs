//! `st-api` — the remote game API as seen by the fleet controller.
//!
//! The real HTTP client (authentication, rate limiting, retries) lives
//! outside this workspace.  What lives here is the boundary it must satisfy:
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`model`]  | Ship, market, contract, waypoint snapshots (serde)         |
//! | [`client`] | The [`ApiClient`] trait                                    |
//! | [`error`]  | `ApiError`, `ApiResult`                                    |
//! | `sim`      | `SimulatedClient` (feature `sim`)                          |
//!
//! # Feature flags
//!
//! | Flag  | Effect                                                       |
//! |-------|--------------------------------------------------------------|
//! | `sim` | In-memory `SimulatedClient` plus fixture builders.           |

pub mod client;
pub mod error;
pub mod model;

#[cfg(feature = "sim")]
pub mod sim;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use model::{
    Cargo, CargoItem, ContractData, ContractTerms, Cooldown, DeliverResult, DeliverTerm,
    Extraction, ExtractionYield, ExtractResult, Fuel, MARKETPLACE, Market, Nav, NavRoute,
    NavStatus, NavigateResult, Payment, SHIPYARD, ShipSnapshot, Shipyard, Survey, SurveyResult,
    System, TradeGood, TradeKind, Waypoint,
};

#[cfg(feature = "sim")]
pub use sim::{ApiCall, SimulatedClient};
