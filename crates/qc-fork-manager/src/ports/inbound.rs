//! Inbound port: height queries against the fork table.

use crate::domain::{ForkError, ForkName};

/// Read-only fork queries.
///
/// Implemented by [`ForkManager`](crate::ForkManager) for every handler
/// type, so consumers that only gate behavior on heights do not need to
/// know what the registry dispatches.
pub trait ForkLookup: Send + Sync {
    /// Whether `name` is registered at all.
    fn is_fork_supported(&self, name: &ForkName) -> bool;

    /// Whether `name` is registered and active at `block`.
    fn is_fork_enabled(&self, name: &ForkName, block: u64) -> bool;

    /// Activation height of `name`.
    fn fork_block(&self, name: &ForkName) -> Result<u64, ForkError>;
}
