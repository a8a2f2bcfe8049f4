//! Named database pool registry.
//!
//! Opens one connection pool per configured source, validates each with a
//! liveness probe, publishes the survivors under case-insensitive names and
//! closes them all again on shutdown.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod registry;

pub use config::schema::PoolshareConfig;
pub use lifecycle::{ActiveRegistry, LifecycleController};
pub use registry::{PoolRegistry, PoolSpec};
