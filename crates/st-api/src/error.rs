use thiserror::Error;

/// Failure of a single remote call.
///
/// The control loop never branches on the variant; every error is logged and
/// retried on the next pass.  The split exists so logs say whether a retry
/// is expected to help.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rate limited; retry after {retry_after_ms} ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("request timed out")]
    Timeout,

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("request rejected ({code}): {message}")]
    Rejected { code: u32, message: String },

    #[error("{kind} {symbol} not found")]
    NotFound { kind: &'static str, symbol: String },
}

impl ApiError {
    /// `true` for network-level and server-side failures.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ApiError::Transport(_)
                | ApiError::RateLimited { .. }
                | ApiError::Timeout
                | ApiError::Server { .. }
        )
    }

    pub fn rejected(code: u32, message: impl Into<String>) -> Self {
        ApiError::Rejected { code, message: message.into() }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
