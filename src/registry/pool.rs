//! Named pool registry.
//!
//! # Responsibilities
//! - Own every live pool, keyed by lowercased source name
//! - Open and probe pools in bulk, isolating per-spec failures
//! - Drain and close every pool on shutdown
//! - Serve lock-free lookups to consumers on any thread

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::Mutex;

use crate::observability::metrics;
use crate::registry::connector::Connector;
use crate::registry::report::BatchReport;
use crate::registry::spec::{normalize_name, PoolSpec};
use crate::registry::types::{PoolError, PoolResult};

type PoolMap<P> = HashMap<String, P>;

/// Thread-safe registry of named pools.
///
/// Lookups read an atomically swapped snapshot of the mapping and never
/// wait on writers. Mutations serialize on an async writer lock and publish
/// a new snapshot per change, so an entry appears or disappears atomically.
pub struct PoolRegistry<C: Connector> {
    connector: Arc<C>,
    pools: ArcSwap<PoolMap<C::Pool>>,
    writer: Mutex<()>,
}

impl<C: Connector> PoolRegistry<C> {
    /// Create an empty registry backed by `connector`.
    pub fn new(connector: Arc<C>) -> Self {
        Self {
            connector,
            pools: ArcSwap::from_pointee(HashMap::new()),
            writer: Mutex::new(()),
        }
    }

    /// Look up a pool by name, case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<C::Pool> {
        self.pools.load().get(&normalize_name(name)).cloned()
    }

    /// Number of published pools.
    pub fn len(&self) -> usize {
        self.pools.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.load().is_empty()
    }

    /// Normalized names of the published pools, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pools.load().keys().cloned().collect();
        names.sort();
        names
    }

    /// Open, probe and publish a pool for every spec.
    ///
    /// Each spec is handled independently: a failure is reported through
    /// `on_error` and recorded in the returned report, and the batch moves
    /// on. Only pools that passed the liveness probe are published.
    pub async fn create_all<I, E>(&self, specs: &[PoolSpec], on_info: I, on_error: E) -> BatchReport
    where
        I: Fn(&str) + Sync,
        E: Fn(&str) + Sync,
    {
        let _guard = self.writer.lock().await;
        let mut report = BatchReport::new();

        for spec in specs {
            let result = match self.create_one(spec).await {
                Ok(pool) => {
                    self.publish(spec.normalized_name(), pool);
                    metrics::record_pool_created();
                    on_info(&format!("Created pool '{}'.", spec.source_name()));
                    Ok(())
                }
                Err(e) => {
                    tracing::debug!(source = %spec.source_name(), spec = ?spec, error = ?e, "Pool creation failed");
                    metrics::record_pool_failure(e.stage());
                    on_error(&format!("Failed to create pool '{}': {}", spec.source_name(), e));
                    Err(e)
                }
            };
            report.record(spec.source_name(), result);
        }

        report
    }

    async fn create_one(&self, spec: &PoolSpec) -> PoolResult<C::Pool> {
        let name = spec.normalized_name();
        if self.pools.load().contains_key(&name) {
            return Err(PoolError::Duplicate(name));
        }

        let pool = self.connector.open(spec).await?;

        if let Err(probe_err) = self.connector.probe(&pool).await {
            // Unpublished pools must not leak their connections.
            if let Err(close_err) = self.connector.close(pool).await {
                tracing::warn!(source = %spec.source_name(), error = %close_err, "Failed to close pool after probe failure");
            }
            return Err(probe_err);
        }

        Ok(pool)
    }

    // Caller holds the writer lock.
    fn publish(&self, name: String, pool: C::Pool) {
        let current = self.pools.load_full();
        let mut next: PoolMap<C::Pool> = (*current).clone();
        next.insert(name, pool);
        self.pools.store(Arc::new(next));
    }

    /// Unpublish a single pool and hand it back without closing it.
    pub async fn remove(&self, name: &str) -> Option<C::Pool> {
        let _guard = self.writer.lock().await;
        let name = normalize_name(name);

        let current = self.pools.load_full();
        if !current.contains_key(&name) {
            return None;
        }

        let mut next: PoolMap<C::Pool> = (*current).clone();
        let removed = next.remove(&name);
        self.pools.store(Arc::new(next));
        removed
    }

    /// Drain the registry, then close every drained pool.
    ///
    /// The mapping is emptied in one swap before any close starts, so
    /// lookups return `None` for every name from that point on. Close
    /// failures are reported through `on_error` and never abort the batch.
    pub async fn close_all<I, E>(&self, on_info: I, on_error: E) -> BatchReport
    where
        I: Fn(&str) + Sync,
        E: Fn(&str) + Sync,
    {
        let _guard = self.writer.lock().await;
        let drained = self.pools.swap(Arc::new(HashMap::new()));

        // A concurrent lookup may still hold the old snapshot.
        let drained = Arc::try_unwrap(drained).unwrap_or_else(|shared| (*shared).clone());
        let mut entries: Vec<(String, C::Pool)> = drained.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut report = BatchReport::new();
        for (name, pool) in entries {
            let result = self.connector.close(pool).await;
            match &result {
                Ok(()) => {
                    metrics::record_pool_closed();
                    on_info(&format!("Closed pool '{}'.", name));
                }
                Err(e) => {
                    tracing::debug!(source = %name, error = ?e, "Pool close failed");
                    metrics::record_pool_failure(e.stage());
                    on_error(&format!("Failed to close pool '{}': {}", name, e));
                }
            }
            report.record(name, result);
        }

        report
    }
}

impl<C: Connector> std::fmt::Debug for PoolRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.names())
            .finish()
    }
}
