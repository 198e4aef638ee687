//! Per-pass context shared by every node of a tree.
//!
//! A `Blackboard` lives for exactly one pass.  Shared collaborators arrive
//! through [`Services`]; mission state is copied in by
//! [`Mission::prepare`](crate::Mission::prepare) and written back by
//! [`Mission::conclude`](crate::Mission::conclude).

use std::sync::Arc;

use tracing::{Span, field, info_span};

use st_api::Survey;
use st_cache::MarketCache;
use st_core::{FleetConfig, TradeSymbol, WaypointSymbol};
use st_routing::{FuelPlanner, RoutePlanner};

use crate::{Contract, LeafError, Ship};
use crate::mission::Mission;

// ── Services ──────────────────────────────────────────────────────────────────

/// Collaborators injected once at startup and shared by every pass.
#[derive(Clone)]
pub struct Services {
    pub cache:   Arc<dyn MarketCache>,
    pub config:  Arc<FleetConfig>,
    pub planner: Arc<dyn RoutePlanner>,
}

impl Services {
    /// Uses a [`FuelPlanner`] configured from `config.planner`.
    pub fn new(cache: Arc<dyn MarketCache>, config: Arc<FleetConfig>) -> Self {
        let planner = Arc::new(FuelPlanner::new(config.planner.clone()));
        Self { cache, config, planner }
    }

    pub fn with_planner(mut self, planner: Arc<dyn RoutePlanner>) -> Self {
        self.planner = planner;
        self
    }
}

// ── TradeIntent ───────────────────────────────────────────────────────────────

/// Buy `good` at `source`, sell it at `buyer`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeIntent {
    pub source: WaypointSymbol,
    pub buyer:  WaypointSymbol,
    pub good:   TradeSymbol,
}

// ── Blackboard ────────────────────────────────────────────────────────────────

pub struct Blackboard {
    pub ship:    Arc<Ship>,
    pub mission: Option<Arc<dyn Mission>>,
    pub cache:   Arc<dyn MarketCache>,
    pub config:  Arc<FleetConfig>,
    pub planner: Arc<dyn RoutePlanner>,

    pub contract:            Option<Contract>,
    pub destination:         Option<WaypointSymbol>,
    pub purchase_good:       Option<TradeSymbol>,
    /// `0` = no limit.
    pub purchase_max_units:  u32,
    pub extraction_waypoint: Option<WaypointSymbol>,
    pub trade:               Option<TradeIntent>,
    /// Survey to steer the next extraction.
    pub survey:              Option<Survey>,
    /// Surveys produced during this pass.
    pub new_surveys:         Vec<Survey>,
    /// Set by a tree to tell its mission the current task is done.
    pub complete:            bool,

    /// Every log line of the pass is emitted inside this span.
    pub span: Span,
}

impl Blackboard {
    pub fn new(ship: Arc<Ship>, services: &Services) -> Self {
        let span = info_span!(
            "pass",
            ship = %ship.symbol(),
            mission = field::Empty,
            role = field::Empty,
        );
        Self {
            ship,
            mission: None,
            cache: services.cache.clone(),
            config: services.config.clone(),
            planner: services.planner.clone(),
            contract: None,
            destination: None,
            purchase_good: None,
            purchase_max_units: 0,
            extraction_waypoint: None,
            trade: None,
            survey: None,
            new_surveys: Vec::new(),
            complete: false,
            span,
        }
    }

    // ── Required fields ───────────────────────────────────────────────────

    pub fn require_destination(&self) -> Result<&WaypointSymbol, LeafError> {
        self.destination.as_ref().ok_or(LeafError::MissingContext("destination"))
    }

    pub fn require_purchase_good(&self) -> Result<&TradeSymbol, LeafError> {
        self.purchase_good.as_ref().ok_or(LeafError::MissingContext("purchase_good"))
    }

    pub fn require_contract(&self) -> Result<&Contract, LeafError> {
        self.contract.as_ref().ok_or(LeafError::MissingContext("contract"))
    }

    pub fn require_contract_mut(&mut self) -> Result<&mut Contract, LeafError> {
        self.contract.as_mut().ok_or(LeafError::MissingContext("contract"))
    }

    pub fn require_extraction_waypoint(&self) -> Result<&WaypointSymbol, LeafError> {
        self.extraction_waypoint
            .as_ref()
            .ok_or(LeafError::MissingContext("extraction_waypoint"))
    }

    pub fn require_trade(&self) -> Result<&TradeIntent, LeafError> {
        self.trade.as_ref().ok_or(LeafError::MissingContext("trade"))
    }

    pub fn require_mission(&self) -> Result<Arc<dyn Mission>, LeafError> {
        self.mission.clone().ok_or(LeafError::MissingContext("mission"))
    }
}
