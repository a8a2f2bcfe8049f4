//! Connector abstraction.
//!
//! The registry never talks to a database driver directly. It drives a
//! [`Connector`], which knows how to open a pool from a spec, run the
//! liveness probe on it and close it again.

use async_trait::async_trait;

use crate::registry::spec::PoolSpec;
use crate::registry::types::PoolResult;

/// Statement run against a freshly opened pool before it is published.
pub const LIVENESS_QUERY: &str = "SELECT 1";

/// Capability to open, probe and close pools.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Handle to an open pool. Cloning must be cheap and share the pool.
    type Pool: Clone + Send + Sync + 'static;

    /// Open a pool for `spec`, using the spec's tuned URL.
    async fn open(&self, spec: &PoolSpec) -> PoolResult<Self::Pool>;

    /// Borrow one connection from `pool` and run [`LIVENESS_QUERY`] on it.
    async fn probe(&self, pool: &Self::Pool) -> PoolResult<()>;

    /// Close `pool`, waiting for its connections to be released.
    async fn close(&self, pool: Self::Pool) -> PoolResult<()>;
}
