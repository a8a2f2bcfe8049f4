//! Pool registry subsystem.
//!
//! # Data Flow
//! ```text
//! [[databases]] config entries
//!     → spec.rs (PoolSpec, name normalization, URL tuning)
//!     → pool.rs (PoolRegistry::create_all)
//!         → connector.rs (open → probe "SELECT 1" → publish)
//!         → report.rs (per-spec outcome)
//!     → lookup(name) by consumers on any thread
//!
//! On shutdown:
//!     pool.rs (PoolRegistry::close_all)
//!         → drain mapping in one swap
//!         → connector.rs (close each pool)
//! ```
//!
//! # Design Decisions
//! - Registry is generic over the connector; mysql.rs is the production one
//! - One failing spec never aborts a batch; failures become report items
//! - Entries are removed before their pool is closed

pub mod connector;
pub mod mysql;
pub mod pool;
pub mod report;
pub mod spec;
pub mod types;

pub use connector::Connector;
pub use mysql::MySqlConnector;
pub use pool::PoolRegistry;
pub use report::BatchReport;
pub use spec::PoolSpec;
pub use types::{PoolError, PoolResult};
