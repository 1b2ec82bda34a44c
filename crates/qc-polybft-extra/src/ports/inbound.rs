//! Inbound port used by header validation and sealing code.

use qc_chain_codec::{Header, SealedHeader};

use crate::domain::{Extra, ExtraHandler, ExtraResult};

/// Height-dispatched access to header extra data.
///
/// Callers never pick a variant themselves; every method resolves the
/// handler active at the relevant block height.
pub trait HeaderExtraApi: Send + Sync {
    /// Variant active at `block`.
    fn handler_at(&self, block: u64) -> ExtraHandler;

    /// Vanity prefix followed by the encoded extra, dispatched on
    /// `extra.block_number`.
    fn encode_extra(&self, extra: &Extra) -> Vec<u8>;

    /// Decode raw header extra bytes belonging to `block`.
    fn decode_extra(&self, raw: &[u8], block: u64) -> ExtraResult<Extra>;

    /// Fork-specific checks for the header's height.
    fn validate_additional(&self, extra: &Extra, header: &Header) -> ExtraResult<()>;

    /// Decode the extra carried by a sealed header.
    fn extra_from_header(&self, header: &SealedHeader) -> ExtraResult<Extra>;

    /// Write `extra` into `header` and seal it.
    fn seal_with_extra(&self, header: Header, extra: &Extra) -> SealedHeader;
}
