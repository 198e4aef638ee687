//! The `ApiClient` collaborator trait.
//!
//! # Contract
//!
//! * Each call is individually rate-limited and safe to retry.
//! * Each mutating call returns the updated sub-resource (buy returns the new
//!   cargo, navigate returns nav and fuel).  Callers copy it over their mirror
//!   without merging.
//! * Timeouts surface as [`ApiError::Timeout`](crate::ApiError::Timeout); the caller treats them like
//!   any other error.
//!
//! Implementations are injected as `Arc<dyn ApiClient>` at process start.

use async_trait::async_trait;

use st_core::{FlightMode, ShipSymbol, SystemSymbol, TradeSymbol, WaypointSymbol};

use crate::model::{
    Cargo, ContractData, DeliverResult, ExtractResult, Fuel, Market, Nav, NavigateResult,
    ShipSnapshot, Shipyard, Survey, SurveyResult, System, Waypoint,
};
use crate::ApiResult;

#[async_trait]
pub trait ApiClient: Send + Sync {
    // ── Fleet ─────────────────────────────────────────────────────────────

    async fn get_ship(&self, ship: &ShipSymbol) -> ApiResult<ShipSnapshot>;

    async fn list_ships(&self) -> ApiResult<Vec<ShipSnapshot>>;

    // ── Navigation ────────────────────────────────────────────────────────

    async fn dock(&self, ship: &ShipSymbol) -> ApiResult<Nav>;

    async fn orbit(&self, ship: &ShipSymbol) -> ApiResult<Nav>;

    async fn navigate(&self, ship: &ShipSymbol, destination: &WaypointSymbol)
        -> ApiResult<NavigateResult>;

    async fn set_flight_mode(&self, ship: &ShipSymbol, mode: FlightMode) -> ApiResult<Nav>;

    /// Refuel `units`, or fill the tank when `None`.
    async fn refuel(&self, ship: &ShipSymbol, units: Option<u32>) -> ApiResult<Fuel>;

    // ── Trade ─────────────────────────────────────────────────────────────

    async fn purchase(&self, ship: &ShipSymbol, good: &TradeSymbol, units: u32)
        -> ApiResult<Cargo>;

    async fn sell(&self, ship: &ShipSymbol, good: &TradeSymbol, units: u32) -> ApiResult<Cargo>;

    async fn jettison(&self, ship: &ShipSymbol, good: &TradeSymbol, units: u32)
        -> ApiResult<Cargo>;

    /// Move cargo between two ships at the same waypoint.  Returns the
    /// sender's cargo.
    async fn transfer_cargo(
        &self,
        from:  &ShipSymbol,
        to:    &ShipSymbol,
        good:  &TradeSymbol,
        units: u32,
    ) -> ApiResult<Cargo>;

    // ── Extraction ────────────────────────────────────────────────────────

    async fn extract(&self, ship: &ShipSymbol, survey: Option<&Survey>) -> ApiResult<ExtractResult>;

    async fn survey(&self, ship: &ShipSymbol) -> ApiResult<SurveyResult>;

    // ── Contracts ─────────────────────────────────────────────────────────

    async fn list_contracts(&self) -> ApiResult<Vec<ContractData>>;

    async fn accept_contract(&self, contract_id: &str) -> ApiResult<ContractData>;

    async fn negotiate_contract(&self, ship: &ShipSymbol) -> ApiResult<ContractData>;

    async fn fulfill_contract(&self, contract_id: &str) -> ApiResult<ContractData>;

    async fn deliver_contract(
        &self,
        contract_id: &str,
        ship:        &ShipSymbol,
        good:        &TradeSymbol,
        units:       u32,
    ) -> ApiResult<DeliverResult>;

    // ── Universe ──────────────────────────────────────────────────────────

    async fn get_market(&self, waypoint: &WaypointSymbol) -> ApiResult<Market>;

    async fn get_shipyard(&self, waypoint: &WaypointSymbol) -> ApiResult<Shipyard>;

    async fn list_systems(&self) -> ApiResult<Vec<System>>;

    async fn list_waypoints(&self, system: &SystemSymbol) -> ApiResult<Vec<Waypoint>>;
}
