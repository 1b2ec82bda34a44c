//! # Shared Types Crate
//!
//! Fixed-width primitives used by every encoding crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: widths of hashes, addresses, blooms and
//!   header nonces are defined once, here.
//! - **Zero values**: every primitive has an all-zero default that the codec
//!   treats as a regular value, never as "absent".

pub mod entities;
pub mod errors;
pub mod hashing;

pub use entities::*;
pub use errors::*;
pub use hashing::*;
