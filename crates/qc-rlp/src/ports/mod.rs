//! Ports layer (Hexagonal Architecture)
//!
//! Traits implemented by every type that has a canonical encoding.

mod codec;

pub use codec::*;
