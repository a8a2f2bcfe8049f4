//! MySQL / MariaDB connector backed by sqlx.
//!
//! # Responsibilities
//! - Turn a [`PoolSpec`] into sqlx connect options (scheme, flag, credentials)
//! - Apply pool tuning from the `[pool]` config section
//! - Run the liveness probe on a borrowed connection
//! - Bound pool shutdown with a timeout

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tokio::time::timeout;

use crate::config::PoolSettings;
use crate::registry::connector::{Connector, LIVENESS_QUERY};
use crate::registry::spec::PoolSpec;
use crate::registry::types::{PoolError, PoolResult};

/// Scheme prefixed to configured URLs that do not carry one.
pub const DEFAULT_SCHEME: &str = "mysql";

/// Connector opening `sqlx` MySQL pools.
#[derive(Debug, Clone, Default)]
pub struct MySqlConnector {
    settings: PoolSettings,
}

impl MySqlConnector {
    pub fn new(settings: PoolSettings) -> Self {
        Self { settings }
    }

    fn pool_options(&self) -> MySqlPoolOptions {
        let settings = &self.settings;
        MySqlPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .idle_timeout(non_zero_secs(settings.idle_timeout_secs))
            .max_lifetime(non_zero_secs(settings.max_lifetime_secs))
    }

    fn close_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.close_timeout_secs)
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    type Pool = MySqlPool;

    async fn open(&self, spec: &PoolSpec) -> PoolResult<MySqlPool> {
        let options = connect_options(spec)?;
        let pool = self
            .pool_options()
            .connect_with(options)
            .await
            .map_err(|e| PoolError::Open(Box::new(e)))?;

        tracing::debug!(source = %spec.source_name(), url = %spec.tuned_url(), "Opened MySQL pool");
        Ok(pool)
    }

    async fn probe(&self, pool: &MySqlPool) -> PoolResult<()> {
        let mut conn = pool
            .acquire()
            .await
            .map_err(|e| PoolError::Probe(Box::new(e)))?;

        sqlx::query(LIVENESS_QUERY)
            .execute(&mut *conn)
            .await
            .map_err(|e| PoolError::Probe(Box::new(e)))?;

        Ok(())
    }

    async fn close(&self, pool: MySqlPool) -> PoolResult<()> {
        let limit = self.close_timeout();
        timeout(limit, pool.close())
            .await
            .map_err(|_| PoolError::CloseTimeout(limit))
    }
}

/// Build connect options for `spec`: tuned URL, scheme, credentials.
pub fn connect_options(spec: &PoolSpec) -> PoolResult<MySqlConnectOptions> {
    let url = with_scheme(&spec.tuned_url());
    let options = MySqlConnectOptions::from_str(&url).map_err(|e| PoolError::InvalidUrl {
        url: spec.url().to_string(),
        reason: e.to_string(),
    })?;

    Ok(options
        .username(spec.username())
        .password(spec.password()))
}

/// Prefix [`DEFAULT_SCHEME`] unless the URL already names a scheme.
///
/// A scheme separator only counts before the first `/` or `?`.
pub fn with_scheme(url: &str) -> String {
    let has_scheme = match url.find("://") {
        Some(at) => !url[..at].contains(|c| c == '/' || c == '?'),
        None => false,
    };
    if has_scheme {
        url.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, url)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    if secs > 0 {
        Some(Duration::from_secs(secs))
    } else {
        None
    }
}
