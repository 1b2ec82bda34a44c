//! # qc-rlp
//!
//! Canonical binary codec (RLP) for Quantum-Chain objects.
//!
//! ## Role in System
//!
//! - **Byte-exact**: hashes and signatures are computed over the encoded
//!   bytes, so every logical value has exactly one accepted encoding.
//! - **Element tree**: values are atoms (byte strings) or lists of values.
//! - **Pooled parsing**: decoding borrows a [`Parser`] from a pool and hands
//!   it back on every exit path.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use qc_rlp::{decode_with, Item};
//!
//! let bytes = Item::list(vec![Item::uint(7), Item::string("dog")]).encode();
//! let (n, s) = decode_with(&bytes, |v| {
//!     let elems = v.elems()?;
//!     Ok::<_, qc_rlp::RlpError>((elems[0].get_uint64()?, elems[1].get_string()?))
//! })?;
//! ```

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
