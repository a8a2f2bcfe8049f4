//! Start/stop orchestration for the active registry.

use std::sync::Arc;

use thiserror::Error;

use crate::config::loader::specs_from_config;
use crate::config::{ConfigError, PoolshareConfig};
use crate::lifecycle::active::ActiveRegistry;
use crate::observability::{metrics, Sinks};
use crate::registry::{BatchReport, Connector, PoolRegistry, PoolSpec};

/// Lifecycle state machine violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// `on_start` was called while a registry is still active.
    #[error("a pool registry is already active; shut it down before starting again")]
    AlreadyActive,
}

/// Drives one registry from creation to shutdown.
pub struct LifecycleController<C: Connector> {
    connector: Arc<C>,
    active: Arc<ActiveRegistry<C>>,
    sinks: Sinks,
}

impl<C: Connector> LifecycleController<C> {
    pub fn new(connector: Arc<C>, active: Arc<ActiveRegistry<C>>, sinks: Sinks) -> Self {
        Self {
            connector,
            active,
            sinks,
        }
    }

    /// The slot consumers look pools up through.
    pub fn active(&self) -> &Arc<ActiveRegistry<C>> {
        &self.active
    }

    /// Create pools for `specs` in a fresh registry, then publish it.
    ///
    /// The registry only becomes visible once every spec has been handled.
    /// Fails without opening anything if a registry is already active.
    pub async fn on_start(&self, specs: &[PoolSpec]) -> Result<BatchReport, LifecycleError> {
        if self.active.is_active() {
            self.sinks.error("Refusing to start: a pool registry is already active.");
            return Err(LifecycleError::AlreadyActive);
        }

        let registry = Arc::new(PoolRegistry::new(self.connector.clone()));
        let report = registry
            .create_all(specs, |m| self.sinks.info(m), |m| self.sinks.error(m))
            .await;

        if let Err(registry) = self.active.publish(registry) {
            // Lost a race with a concurrent start; release what we opened.
            self.sinks.error("Refusing to start: a pool registry was activated concurrently.");
            registry
                .close_all(|m| self.sinks.info(m), |m| self.sinks.error(m))
                .await;
            return Err(LifecycleError::AlreadyActive);
        }

        // Only the published registry drives the gauge.
        metrics::record_active_pools(report.success_count());
        tracing::info!(
            created = report.success_count(),
            failed = report.failure_count(),
            "Pool registry active"
        );
        Ok(report)
    }

    /// Start from the outcome of loading configuration.
    ///
    /// Database entries that fail their checks are reported one by one and
    /// skipped; the rest are created. When the file itself could not be
    /// loaded the error is reported and an empty registry is published, so
    /// every lookup returns `None`.
    pub async fn on_start_from(
        &self,
        config: Result<PoolshareConfig, ConfigError>,
    ) -> Result<BatchReport, LifecycleError> {
        match config {
            Ok(config) => {
                let (specs, skipped) = specs_from_config(&config);
                for e in &skipped {
                    metrics::record_pool_failure("config");
                    self.sinks.error(&format!("Skipping database entry: {}", e));
                }
                self.on_start(&specs).await
            }
            Err(e) => {
                self.sinks.error(&format!("Failed to load configuration: {}", e));
                self.on_start(&[]).await
            }
        }
    }

    /// Unpublish the active registry, then close all of its pools.
    ///
    /// Returns `None` when nothing was active.
    pub async fn on_shutdown(&self) -> Option<BatchReport> {
        let registry = self.active.take()?;
        metrics::record_active_pools(0);

        let report = registry
            .close_all(|m| self.sinks.info(m), |m| self.sinks.error(m))
            .await;

        tracing::info!(
            closed = report.success_count(),
            failed = report.failure_count(),
            "Pool registry shut down"
        );
        Some(report)
    }
}

impl<C: Connector> std::fmt::Debug for LifecycleController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController")
            .field("active", &self.active)
            .finish()
    }
}
