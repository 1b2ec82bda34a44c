//! Domain layer for the chain object codec

mod block;
mod error;
mod header;
mod log;
mod receipt;
mod transaction;
mod typed;

pub use block::*;
pub use error::*;
pub use header::*;
pub use log::*;
pub use receipt::*;
pub use transaction::*;
pub use typed::*;
