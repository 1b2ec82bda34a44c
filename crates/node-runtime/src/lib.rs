//! # Node Runtime Library
//!
//! Assembles the fork registry and extra-data codec from configuration and
//! exposes them to the `node-runtime` binary and to tests.
//!
//! - `container/` - configuration loading (chain file + environment)
//! - `telemetry` - tracing subscriber setup
//! - `runtime` - `NodeRuntime` and block inspection

pub mod container;
pub mod runtime;
pub mod telemetry;

pub use container::{ConfigError, NodeConfig};
pub use runtime::{BlockSummary, NodeRuntime, RuntimeError};
