//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (materialize default on first run, parse & deserialize)
//!     → validation.rs (file-wide checks: [pool] ranges)
//!     → PoolshareConfig (validated, immutable)
//!     → loader.rs (specs_from_config → usable specs + skipped entries)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::PoolshareConfig;
pub use schema::DatabaseConfig;
pub use schema::PoolSettings;
pub use schema::{LoggingConfig, MetricsConfig};
