//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate pool tuning ranges for the whole file
//! - Check each database entry on its own: name, credentials, URL
//! - Skip later entries whose name repeats an earlier one (case-insensitive)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Only `[pool]` problems make the file unusable; a bad database entry
//!   only takes out that entry

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::{DatabaseConfig, PoolSettings, PoolshareConfig};
use crate::registry::mysql::with_scheme;
use crate::registry::spec::normalize_name;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName { index: usize },
    EmptyField { source: String, field: &'static str },
    DuplicateName(String),
    InvalidUrl { source: String, reason: String },
    InvalidPoolSetting(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName { index } => {
                write!(f, "database #{} has an empty name", index + 1)
            }
            ValidationError::EmptyField { source, field } => {
                write!(f, "database '{}' has an empty {}", source, field)
            }
            ValidationError::DuplicateName(name) => {
                write!(f, "database name '{}' is used more than once", name)
            }
            ValidationError::InvalidUrl { source, reason } => {
                write!(f, "database '{}' has an invalid url: {}", source, reason)
            }
            ValidationError::InvalidPoolSetting(msg) => write!(f, "invalid pool setting: {}", msg),
        }
    }
}

/// Validate the settings that apply to the whole file.
pub fn validate_config(config: &PoolshareConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_pool_settings(&config.pool, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check every database entry, in file order.
///
/// Each entry yields either itself or the first problem found with it. A
/// name that repeats an earlier usable entry is rejected, keeping the first.
pub fn check_databases(databases: &[DatabaseConfig]) -> Vec<Result<&DatabaseConfig, ValidationError>> {
    let mut seen = HashSet::new();
    databases
        .iter()
        .enumerate()
        .map(|(index, db)| {
            if let Err(e) = check_database(index, db) {
                return Err(e);
            }
            if !seen.insert(normalize_name(&db.name)) {
                return Err(ValidationError::DuplicateName(db.name.clone()));
            }
            Ok(db)
        })
        .collect()
}

fn check_database(index: usize, db: &DatabaseConfig) -> Result<(), ValidationError> {
    if db.name.trim().is_empty() {
        return Err(ValidationError::EmptyName { index });
    }

    if db.username.is_empty() {
        return Err(ValidationError::EmptyField {
            source: db.name.clone(),
            field: "username",
        });
    }

    if db.url.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            source: db.name.clone(),
            field: "url",
        });
    }

    url::Url::parse(&with_scheme(&db.url)).map_err(|e| ValidationError::InvalidUrl {
        source: db.name.clone(),
        reason: e.to_string(),
    })?;

    Ok(())
}

fn validate_pool_settings(pool: &PoolSettings, errors: &mut Vec<ValidationError>) {
    if pool.max_connections == 0 {
        errors.push(ValidationError::InvalidPoolSetting(
            "max_connections must be at least 1".to_string(),
        ));
    }
    if pool.min_connections > pool.max_connections {
        errors.push(ValidationError::InvalidPoolSetting(format!(
            "min_connections ({}) exceeds max_connections ({})",
            pool.min_connections, pool.max_connections
        )));
    }
    if pool.acquire_timeout_secs == 0 {
        errors.push(ValidationError::InvalidPoolSetting(
            "acquire_timeout_secs must be at least 1 second".to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(name: &str, url: &str) -> DatabaseConfig {
        DatabaseConfig {
            name: name.into(),
            username: "root".into(),
            password: String::new(),
            url: url.into(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = PoolshareConfig {
            databases: vec![db("main", "localhost:3306/main"), db("logs", "logs:3306/logs?x=1")],
            ..PoolshareConfig::default()
        };
        assert!(validate_config(&config).is_ok());
        assert!(check_databases(&config.databases).iter().all(Result::is_ok));
    }

    #[test]
    fn test_bad_database_does_not_fail_the_file() {
        let config = PoolshareConfig {
            databases: vec![db("bad", "localhost:port/main")],
            ..PoolshareConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_pool_settings_collect_every_error() {
        let mut config = PoolshareConfig::default();
        config.pool.max_connections = 0;
        config.pool.min_connections = 2;
        config.pool.acquire_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_duplicate_names_ignore_case() {
        let databases = vec![db("Main", "localhost/main"), db("MAIN", "localhost/other")];
        let checked = check_databases(&databases);
        assert_eq!(checked[0].as_ref().unwrap().name, "Main");
        assert_eq!(checked[1], Err(ValidationError::DuplicateName("MAIN".into())));
    }

    #[test]
    fn test_each_entry_is_checked_on_its_own() {
        let mut no_user = db("nouser", "localhost/main");
        no_user.username.clear();
        let databases = vec![
            db("", "localhost/main"),
            db("bad", "localhost:port/main"),
            db("empty", ""),
            no_user,
            db("good", "localhost:3306/good"),
        ];

        let checked = check_databases(&databases);
        assert_eq!(checked.len(), 5);
        assert_eq!(checked[0], Err(ValidationError::EmptyName { index: 0 }));
        assert!(matches!(&checked[1], Err(ValidationError::InvalidUrl { source, .. }) if source == "bad"));
        assert_eq!(
            checked[2],
            Err(ValidationError::EmptyField {
                source: "empty".into(),
                field: "url"
            })
        );
        assert_eq!(
            checked[3],
            Err(ValidationError::EmptyField {
                source: "nouser".into(),
                field: "username"
            })
        );
        assert!(checked[4].is_ok());
    }

    #[test]
    fn test_invalid_entry_does_not_claim_its_name() {
        let databases = vec![db("main", "localhost:port/main"), db("MAIN", "localhost:3306/main")];
        let checked = check_databases(&databases);
        assert!(checked[0].is_err());
        assert!(checked[1].is_ok());
    }
}
