//! # Fork Manager
//!
//! Keeps the fork table and, per capability, the handlers sorted by the
//! activation height of the fork each was registered on.
//!
//! ## Ordering
//!
//! Both lists are kept ascending by height. Entries with equal heights keep
//! registration order, so the later registration wins a lookup.
//!
//! ## Thread Safety
//!
//! A single `parking_lot::Mutex` guards all state. Every call holds it for
//! its whole duration and never runs caller code while holding it.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::domain::{Fork, ForkError, ForkHandler, ForkName, HandlerName};
use crate::ports::ForkLookup;

#[derive(Debug)]
struct ForkTable<H> {
    by_name: HashMap<ForkName, Fork>,
    forks: Vec<Fork>,
    handlers: HashMap<HandlerName, Vec<ForkHandler<H>>>,
}

/// Registry of forks and fork-versioned handlers.
#[derive(Debug)]
pub struct ForkManager<H> {
    table: Mutex<ForkTable<H>>,
}

impl<H> Default for ForkManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ForkManager<H> {
    /// Registry holding only the base fork at height 0.
    pub fn new() -> Self {
        let base = Fork::new(ForkName::BASE, 0);
        Self {
            table: Mutex::new(ForkTable {
                by_name: HashMap::from([(base.name.clone(), base.clone())]),
                forks: vec![base],
                handlers: HashMap::new(),
            }),
        }
    }

    /// Register `name` as active from `from_block`.
    ///
    /// Registering a known name again replaces its height. Handlers already
    /// attached to it keep the height they were registered with.
    pub fn register_fork(&self, name: ForkName, from_block: u64) {
        let mut table = self.table.lock();

        if let Some(previous) = table.by_name.get(&name) {
            warn!(
                fork = %name,
                previous = previous.from_block,
                from_block,
                "[qc-fork-manager] fork re-registered, replacing activation height"
            );
            table.forks.retain(|f| f.name != name);
        }

        let fork = Fork::new(name.clone(), from_block);
        let index = table.forks.partition_point(|f| f.from_block <= from_block);
        table.forks.insert(index, fork.clone());
        table.by_name.insert(name.clone(), fork);

        info!(fork = %name, from_block, "[qc-fork-manager] fork registered");
    }

    /// Attach `handler` for capability `name`, effective from `fork`'s height.
    pub fn register_handler(
        &self,
        fork: &ForkName,
        name: HandlerName,
        handler: H,
    ) -> Result<(), ForkError> {
        let mut table = self.table.lock();

        let from_block = table
            .by_name
            .get(fork)
            .map(|f| f.from_block)
            .ok_or_else(|| ForkError::ForkNotFound(fork.clone()))?;

        debug!(
            capability = %name,
            fork = %fork,
            from_block,
            "[qc-fork-manager] handler registered"
        );

        let handlers = table.handlers.entry(name).or_default();
        let index = handlers.partition_point(|h| h.from_block <= from_block);
        handlers.insert(index, ForkHandler { from_block, handler });

        Ok(())
    }

    /// Whether `name` is registered.
    pub fn is_fork_supported(&self, name: &ForkName) -> bool {
        self.table.lock().by_name.contains_key(name)
    }

    /// Whether `name` is registered and active at `block`.
    pub fn is_fork_enabled(&self, name: &ForkName, block: u64) -> bool {
        self.table
            .lock()
            .by_name
            .get(name)
            .is_some_and(|f| f.is_active_at(block))
    }

    /// Activation height of `name`.
    pub fn fork_block(&self, name: &ForkName) -> Result<u64, ForkError> {
        self.table
            .lock()
            .by_name
            .get(name)
            .map(|f| f.from_block)
            .ok_or_else(|| ForkError::ForkNotFound(name.clone()))
    }

    /// Fork table in activation order.
    pub fn forks(&self) -> Vec<Fork> {
        self.table.lock().forks.clone()
    }
}

impl<H: Clone> ForkManager<H> {
    /// Handler for capability `name` at `block`.
    ///
    /// # Panics
    ///
    /// If no handler was registered for `name`, or none is active at
    /// `block`. Both mean startup wiring is incomplete.
    pub fn handler(&self, name: &HandlerName, block: u64) -> H {
        let table = self.table.lock();

        let Some(handlers) = table.handlers.get(name) else {
            panic!("handlers not registered for {name}");
        };

        let pos = handlers.partition_point(|h| h.from_block <= block);
        if pos == 0 {
            panic!("no {name} handler active at block {block}");
        }

        let entry = &handlers[pos - 1];
        trace!(
            capability = %name,
            block,
            from_block = entry.from_block,
            "[qc-fork-manager] handler resolved"
        );
        entry.handler.clone()
    }
}

impl<H: Send> ForkLookup for ForkManager<H> {
    fn is_fork_supported(&self, name: &ForkName) -> bool {
        ForkManager::is_fork_supported(self, name)
    }

    fn is_fork_enabled(&self, name: &ForkName, block: u64) -> bool {
        ForkManager::is_fork_enabled(self, name, block)
    }

    fn fork_block(&self, name: &ForkName) -> Result<u64, ForkError> {
        ForkManager::fork_block(self, name)
    }
}
