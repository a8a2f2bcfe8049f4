//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry and lifecycle produce:
//!     → logging.rs (info/error sinks, structured tracing events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, Sink, Sinks};
