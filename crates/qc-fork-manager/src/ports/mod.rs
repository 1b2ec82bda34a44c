//! Ports for the fork registry

pub mod inbound;

pub use inbound::*;
