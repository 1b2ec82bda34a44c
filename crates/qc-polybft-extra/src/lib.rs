//! # qc-polybft-extra
//!
//! Fork-versioned codec for the consensus data stored in a header's extra
//! field.
//!
//! ## Role in System
//!
//! - **Sealing**: consensus builds an [`Extra`], signs the hash of its
//!   [`Extra::clean`] form, fills in the committed signature and seals the
//!   header through [`ExtraCodec::seal_with_extra`].
//! - **Validation**: decoding picks the [`ExtraHandler`] active at the
//!   header's height from the fork registry, so blocks from before a fork
//!   keep decoding under the rules they were produced with.
//!
//! ## Layout
//!
//! ```text
//! header.extra_data = [0u8; 32] ++ rlp([validators, parent, committed, checkpoint, fork fields...])
//! ```
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `Extra` and its parts, `ExtraHandler`,
//!   `ForkSchedule`, `ExtraError`
//! - **Ports Layer** (`ports/`): `HeaderExtraApi`
//! - **Service Layer** (`service`): `ExtraCodec`, `register_extra_handlers`

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::{register_extra_handlers, ExtraCodec};
