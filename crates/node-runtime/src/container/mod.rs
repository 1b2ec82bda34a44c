//! # Container
//!
//! Configuration and the wiring that turns it into shared services.

pub mod config;

pub use config::{ChainConfig, ConfigError, LoggingConfig, NodeConfig, CHAIN_CONFIG_ENV};
