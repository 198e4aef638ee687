//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` covers what this
//! crate can fail at: parsing wire enums and loading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown flight mode {0:?}")]
    UnknownFlightMode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `st-core`.
pub type CoreResult<T> = Result<T, CoreError>;
