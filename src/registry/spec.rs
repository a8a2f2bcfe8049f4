//! Pool specifications.
//!
//! A [`PoolSpec`] is the declarative description of one pool. It is built
//! from configuration, handed to [`PoolRegistry::create_all`] once, and
//! dropped afterwards.
//!
//! [`PoolRegistry::create_all`]: crate::registry::PoolRegistry::create_all

use std::fmt;

use crate::config::DatabaseConfig;

/// Query flag enabling server-side prepared statements on the connector.
pub const SERVER_PREPARED_STATEMENTS_FLAG: &str = "useServerPrepStmts";

/// Immutable description of a single named pool.
#[derive(Clone, PartialEq, Eq)]
pub struct PoolSpec {
    source_name: String,
    username: String,
    password: String,
    url: String,
}

impl PoolSpec {
    pub fn new(
        source_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            username: username.into(),
            password: password.into(),
            url: url.into(),
        }
    }

    /// Name as written in configuration.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Lowercased name, the key the pool is published under.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.source_name)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// URL exactly as configured.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL the pool is opened against: the configured URL with the
    /// server-side prepared statement flag appended to its query string.
    pub fn tuned_url(&self) -> String {
        with_query_flag(&self.url, SERVER_PREPARED_STATEMENTS_FLAG)
    }
}

impl From<&DatabaseConfig> for PoolSpec {
    fn from(config: &DatabaseConfig) -> Self {
        Self::new(
            config.name.clone(),
            config.username.clone(),
            config.password.clone(),
            config.url.clone(),
        )
    }
}

// Password stays out of logs.
impl fmt::Debug for PoolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolSpec")
            .field("source_name", &self.source_name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .finish()
    }
}

impl fmt::Display for PoolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}@{})", self.source_name, self.username, self.url)
    }
}

/// Normalize a source name for lookup.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Append `flag` to the query string of `url`.
///
/// Uses `&` when the URL already carries a `?`-delimited query, `?`
/// otherwise.
pub fn with_query_flag(url: &str, flag: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{flag}")
}
