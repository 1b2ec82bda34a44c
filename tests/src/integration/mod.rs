//! # Integration Flows
//!
//! - `codec_flows`: chain objects through the canonical codec
//! - `fork_flows`: fork registry driving extra-data dispatch end to end

pub mod codec_flows;
pub mod fork_flows;
