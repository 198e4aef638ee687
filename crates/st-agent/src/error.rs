use thiserror::Error;
use tracing::{debug, error, warn};

use st_api::ApiError;
use st_behavior::Status;
use st_cache::CacheError;
use st_routing::RoutingError;

// ── ShipError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ShipError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub type ShipResult<T> = Result<T, ShipError>;

// ── LeafError ─────────────────────────────────────────────────────────────────

/// Why a leaf did not produce a status on its own.
///
/// | Variant          | Resolves to | Meaning                                        |
/// |------------------|-------------|------------------------------------------------|
/// | `Remote`         | `Running`   | remote call failed; retry next pass            |
/// | `MissingContext` | `Running`   | blackboard field not set: a wiring bug         |
/// | `Cache`          | `Running`   | cache read/write failed                        |
/// | `Precondition`   | `Failure`   | business rule not met; try another branch      |
/// | `NoRoute`        | `Failure`   | planner cannot solve the graph                 |
#[derive(Debug, Error)]
pub enum LeafError {
    #[error("remote call failed: {0}")]
    Remote(#[from] ShipError),

    #[error("blackboard field `{0}` is not set")]
    MissingContext(&'static str),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("{0}")]
    Precondition(String),

    #[error("no route: {0}")]
    NoRoute(#[from] RoutingError),
}

impl From<ApiError> for LeafError {
    fn from(e: ApiError) -> Self {
        LeafError::Remote(ShipError::Api(e))
    }
}

impl LeafError {
    pub fn precondition(msg: impl Into<String>) -> Self {
        LeafError::Precondition(msg.into())
    }

    /// The status this error stands for.
    pub fn status(&self) -> Status {
        match self {
            LeafError::Remote(_) | LeafError::MissingContext(_) | LeafError::Cache(_) => {
                Status::Running
            }
            LeafError::Precondition(_) | LeafError::NoRoute(_) => Status::Failure,
        }
    }
}

pub type LeafResult = Result<Status, LeafError>;

/// Collapse a leaf result to a status, logging the error.
pub fn resolve(leaf: &'static str, result: LeafResult) -> Status {
    let err = match result {
        Ok(status) => return status,
        Err(err) => err,
    };
    match &err {
        LeafError::Remote(ShipError::Api(api)) => {
            warn!(leaf, transient = api.is_transient(), error = %err, "remote call failed")
        }
        LeafError::Remote(_) | LeafError::Cache(_) => warn!(leaf, error = %err, "leaf failed"),
        LeafError::MissingContext(_) => error!(leaf, error = %err, "mission wiring error"),
        LeafError::Precondition(_) => debug!(leaf, reason = %err, "precondition not met"),
        LeafError::NoRoute(_) => warn!(leaf, error = %err, "route planning failed"),
    }
    err.status()
}
