//! Domain layer for header extra data

mod errors;
mod extra;
mod handler;
mod schedule;

pub use errors::*;
pub use extra::*;
pub use handler::*;
pub use schedule::*;
