use thiserror::Error;

use st_api::ApiError;
use st_cache::CacheError;
use st_core::{CoreError, ShipSymbol};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("bootstrap call failed: {0}")]
    Api(#[from] ApiError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("no ship {0} in the fleet")]
    UnknownShip(ShipSymbol),

    #[error("control loop task failed: {0}")]
    Task(String),
}

pub type FleetResult<T> = Result<T, FleetError>;
