//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (controller.rs):
//!     Specs → fresh PoolRegistry → create_all → publish into active.rs
//!
//! Shutdown (controller.rs):
//!     Signal received (signals.rs) → unpublish from active.rs → close_all
//! ```
//!
//! # Design Decisions
//! - Publish only after creation completes
//! - Unpublish before closing, so no new lookup reaches a closing registry
//! - A second start while active is rejected

pub mod active;
pub mod controller;
pub mod signals;

pub use active::ActiveRegistry;
pub use controller::{LifecycleController, LifecycleError};
