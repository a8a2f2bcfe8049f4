//! The active registry slot.
//!
//! # States
//! ```text
//! Empty → Active: publish() after a registry finished creating its pools
//! Active → Empty: take() at shutdown, before any pool is closed
//! ```
//!
//! # Design Decisions
//! - The slot is an explicit object shared by `Arc`, not a global
//! - Reads and writes are single atomic pointer operations
//! - Publishing only succeeds from Empty

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::registry::{Connector, PoolRegistry};

/// Holds the one registry that consumers currently look pools up in.
pub struct ActiveRegistry<C: Connector> {
    slot: ArcSwapOption<PoolRegistry<C>>,
}

impl<C: Connector> ActiveRegistry<C> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    /// Look up a pool in the active registry, if there is one.
    pub fn lookup(&self, name: &str) -> Option<C::Pool> {
        match &*self.slot.load() {
            Some(registry) => registry.lookup(name),
            None => None,
        }
    }

    /// The active registry, if any.
    pub fn get(&self) -> Option<Arc<PoolRegistry<C>>> {
        self.slot.load_full()
    }

    pub fn is_active(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Publish `registry` if the slot is empty.
    ///
    /// Hands the registry back when another one is already active.
    pub(crate) fn publish(&self, registry: Arc<PoolRegistry<C>>) -> Result<(), Arc<PoolRegistry<C>>> {
        let previous = self
            .slot
            .compare_and_swap(&None::<Arc<PoolRegistry<C>>>, Some(registry.clone()));
        if previous.is_none() {
            Ok(())
        } else {
            Err(registry)
        }
    }

    /// Unpublish and return the active registry.
    pub(crate) fn take(&self) -> Option<Arc<PoolRegistry<C>>> {
        self.slot.swap(None)
    }
}

impl<C: Connector> Default for ActiveRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> std::fmt::Debug for ActiveRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveRegistry")
            .field("registry", &self.get())
            .finish()
    }
}
