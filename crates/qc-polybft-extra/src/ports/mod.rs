//! Ports for the extra-data dispatcher

pub mod inbound;

pub use inbound::*;
