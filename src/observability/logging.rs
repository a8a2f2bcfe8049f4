//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Provide the info/error sinks batch operations report through
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via config and environment (`RUST_LOG` wins)

use std::fmt;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// A single message sink.
pub type Sink = Arc<dyn Fn(&str) + Send + Sync>;

/// The pair of sinks lifecycle operations report through.
#[derive(Clone)]
pub struct Sinks {
    info: Sink,
    error: Sink,
}

impl Sinks {
    pub fn new<I, E>(info: I, error: E) -> Self
    where
        I: Fn(&str) + Send + Sync + 'static,
        E: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            info: Arc::new(info),
            error: Arc::new(error),
        }
    }

    /// Sinks forwarding to `tracing` at info and error level.
    pub fn tracing() -> Self {
        Self::new(
            |msg| tracing::info!(target: "poolshare", "{}", msg),
            |msg| tracing::error!(target: "poolshare", "{}", msg),
        )
    }

    pub fn info(&self, msg: &str) {
        (self.info)(msg)
    }

    pub fn error(&self, msg: &str) {
        (self.error)(msg)
    }
}

impl Default for Sinks {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for Sinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sinks")
    }
}

/// Install the global tracing subscriber.
///
/// Does nothing if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("poolshare={},sqlx=warn", config.level)));

    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
