//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for poolshare.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PoolshareConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// Metrics exporter settings.
    pub metrics: MetricsConfig,

    /// Tuning shared by every pool.
    pub pool: PoolSettings,

    /// Named database sources, in the order they are created.
    pub databases: Vec<DatabaseConfig>,
}

/// One named database source.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Source name consumers look the pool up by (case-insensitive).
    pub name: String,

    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Connection URL, e.g. "localhost:3306/main". A `mysql://` scheme is
    /// assumed when none is given.
    pub url: String,
}

/// Pool tuning applied to every source.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PoolSettings {
    /// Maximum connections per pool.
    pub max_connections: u32,

    /// Connections kept open while idle.
    pub min_connections: u32,

    /// Time allowed to borrow a connection, in seconds.
    pub acquire_timeout_secs: u64,

    /// Idle connection lifetime in seconds (0 = never reaped).
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds (0 = unlimited).
    pub max_lifetime_secs: u64,

    /// Time allowed for a pool to close on shutdown, in seconds.
    pub close_timeout_secs: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            close_timeout_secs: 10,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus scrape endpoint.
    pub enabled: bool,

    /// Scrape endpoint bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "127.0.0.1:9090".to_string(),
        }
    }
}
