//! Domain layer for the fork registry

mod entities;
mod errors;

pub use entities::*;
pub use errors::*;
