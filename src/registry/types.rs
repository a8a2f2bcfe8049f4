//! Registry error definitions.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while opening, probing or closing a single pool.
///
/// None of these escape a batch operation: they are collected into a
/// [`BatchReport`](crate::registry::report::BatchReport) and reported
/// through the error sink.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The connection URL could not be turned into connect options.
    #[error("invalid connection URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The pool could not be opened (unreachable host, bad credentials).
    #[error("failed to open pool: {0}")]
    Open(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The pool opened but the liveness probe did not succeed.
    #[error("liveness probe failed: {0}")]
    Probe(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Another pool is already published under the same normalized name.
    #[error("a pool named '{0}' is already registered")]
    Duplicate(String),

    /// Closing the pool reported an error.
    #[error("failed to close pool: {0}")]
    Close(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Closing the pool did not finish in time.
    #[error("pool did not close within {0:?}")]
    CloseTimeout(Duration),
}

impl PoolError {
    /// Short label for the stage that failed, used as a metrics label.
    pub fn stage(&self) -> &'static str {
        match self {
            PoolError::InvalidUrl { .. } | PoolError::Open(_) => "open",
            PoolError::Probe(_) => "probe",
            PoolError::Duplicate(_) => "duplicate",
            PoolError::Close(_) | PoolError::CloseTimeout(_) => "close",
        }
    }
}

impl From<sqlx::Error> for PoolError {
    fn from(err: sqlx::Error) -> Self {
        PoolError::Open(Box::new(err))
    }
}

/// Result type for single-pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
