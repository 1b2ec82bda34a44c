//! # qc-chain-codec
//!
//! Canonical encoding of chain objects for Quantum-Chain.
//!
//! ## Role in System
//!
//! - **Producers** (block builder, consensus) encode headers, blocks,
//!   transactions and receipts for hashing, signing, gossip and storage.
//! - **Consumers** (network, storage) decode bytes back into objects.
//! - **Sealed identities**: [`SealedHeader`] and [`Transaction`] carry a hash
//!   that is computed once, from the canonical encoding, whenever the object
//!   is built or decoded.
//!
//! ## Wire Layout
//!
//! | Object | Elements |
//! |--------|----------|
//! | Header | 15 |
//! | Block | 3 (header, transactions, uncles) |
//! | Legacy transaction | 9 |
//! | Dynamic-fee transaction | 12, tagged `0x02` |
//! | State transaction | 7, tagged `0x7f` |
//! | Receipt | 4 |
//! | Log | 3 |
//!
//! Typed objects inside a list are preceded by a one-byte atom holding the
//! type; a bare typed object is preceded by the raw type byte.

pub mod domain;

pub use domain::*;
