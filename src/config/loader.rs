//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::PoolshareConfig;
use crate::config::validation::{check_databases, validate_config, ValidationError};
use crate::registry::spec::PoolSpec;

/// Template written on first run when no config file exists.
pub const DEFAULT_CONFIG: &str = r#"# poolshare configuration

[logging]
level = "info"
json = false

[metrics]
enabled = false
address = "127.0.0.1:9090"

[pool]
max_connections = 10
min_connections = 0
acquire_timeout_secs = 5
idle_timeout_secs = 600
max_lifetime_secs = 1800
close_timeout_secs = 10

# One table per named source. Names are case-insensitive.
#
# [[databases]]
# name = "main"
# username = "root"
# password = ""
# url = "localhost:3306/main"
"#;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<PoolshareConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
///
/// Only file-wide problems fail here; database entries are checked when
/// specs are built from them.
pub fn parse_config(content: &str) -> Result<PoolshareConfig, ConfigError> {
    let config: PoolshareConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Write [`DEFAULT_CONFIG`] to `path` unless a file is already there.
///
/// Returns true when a new file was written.
pub fn ensure_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;
    tracing::info!(path = %path.display(), "Wrote default configuration");
    Ok(true)
}

/// Build pool specs from the configured databases, in file order.
///
/// Entries that fail their checks are left out and returned alongside the
/// specs, one error per skipped entry.
pub fn specs_from_config(config: &PoolshareConfig) -> (Vec<PoolSpec>, Vec<ValidationError>) {
    let mut specs = Vec::new();
    let mut skipped = Vec::new();

    for checked in check_databases(&config.databases) {
        match checked {
            Ok(db) => specs.push(PoolSpec::from(db)),
            Err(e) => skipped.push(e),
        }
    }

    (specs, skipped)
}
