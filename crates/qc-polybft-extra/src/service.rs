//! # Extra Codec Service
//!
//! Resolves the [`ExtraHandler`] for a block height from the shared fork
//! registry and delegates to it. Also wires the handlers into the registry
//! at startup.

use std::sync::Arc;

use qc_chain_codec::{Header, SealedHeader};
use qc_fork_manager::{ForkError, ForkManager, ForkName};
use qc_rlp::decode_with;
use tracing::{debug, info};

use crate::domain::{Extra, ExtraError, ExtraHandler, ExtraResult, ForkSchedule, EXTRA_VANITY};
use crate::ports::HeaderExtraApi;

/// Register the extra-data forks from `schedule` and one handler per fork.
///
/// `Base` always goes on the base fork. `London` and `Nikaragva` are only
/// registered when the schedule gives them a height.
pub fn register_extra_handlers(
    forks: &ForkManager<ExtraHandler>,
    schedule: &ForkSchedule,
) -> Result<(), ForkError> {
    if let Some(height) = schedule.london {
        forks.register_fork(ForkName::LONDON, height);
    }
    if let Some(height) = schedule.nikaragva {
        forks.register_fork(ForkName::NIKARAGVA, height);
    }

    for handler in ExtraHandler::ALL {
        let scheduled = match handler {
            ExtraHandler::Base => true,
            ExtraHandler::London => schedule.london.is_some(),
            ExtraHandler::Nikaragva => schedule.nikaragva.is_some(),
        };
        if scheduled {
            forks.register_handler(&handler.fork(), ExtraHandler::CAPABILITY, handler)?;
        }
    }

    info!(
        london = ?schedule.london,
        nikaragva = ?schedule.nikaragva,
        "[qc-polybft-extra] extra handlers registered"
    );
    Ok(())
}

/// Height-dispatched extra-data codec.
#[derive(Debug, Clone)]
pub struct ExtraCodec {
    forks: Arc<ForkManager<ExtraHandler>>,
}

impl ExtraCodec {
    pub fn new(forks: Arc<ForkManager<ExtraHandler>>) -> Self {
        Self { forks }
    }

    pub fn forks(&self) -> &Arc<ForkManager<ExtraHandler>> {
        &self.forks
    }

    /// # Panics
    ///
    /// If no extra handler is registered at or below `block`.
    pub fn handler_at(&self, block: u64) -> ExtraHandler {
        self.forks.handler(&ExtraHandler::CAPABILITY, block)
    }

    /// Encode under the variant active at `extra.block_number`.
    pub fn encode(&self, extra: &Extra) -> Vec<u8> {
        self.encode_at(extra, extra.block_number)
    }

    /// Encode under the variant active at `block`.
    pub fn encode_at(&self, extra: &Extra, block: u64) -> Vec<u8> {
        let item = self.handler_at(block).rlp_item(extra);
        let mut out = Vec::with_capacity(EXTRA_VANITY + item.encoded_len());
        out.resize(EXTRA_VANITY, 0);
        item.encode_to(&mut out);
        out
    }

    /// Decode the extra bytes of the header at `block`.
    pub fn decode(&self, raw: &[u8], block: u64) -> ExtraResult<Extra> {
        if raw.len() < EXTRA_VANITY {
            return Err(ExtraError::ExtraTooShort(raw.len()));
        }

        let handler = self.handler_at(block);
        decode_with(&raw[EXTRA_VANITY..], |value| handler.from_value(value, block)).map_err(
            |err| {
                debug!(
                    block,
                    handler = %handler,
                    error = %err,
                    "[qc-polybft-extra] extra decode failed"
                );
                err
            },
        )
    }

    /// Run the fork-field checks of the variant active at the header's
    /// height.
    pub fn validate_additional(&self, extra: &Extra, header: &Header) -> ExtraResult<()> {
        self.handler_at(header.number)
            .validate_additional(extra, header)
    }

    pub fn extra_from_header(&self, header: &SealedHeader) -> ExtraResult<Extra> {
        self.decode(&header.extra_data, header.number)
    }

    /// Replace the header's extra bytes and seal, so the hash covers the
    /// new extra.
    pub fn seal_with_extra(&self, mut header: Header, extra: &Extra) -> SealedHeader {
        header.extra_data = self.encode_at(extra, header.number);
        header.seal()
    }
}

impl HeaderExtraApi for ExtraCodec {
    fn handler_at(&self, block: u64) -> ExtraHandler {
        ExtraCodec::handler_at(self, block)
    }

    fn encode_extra(&self, extra: &Extra) -> Vec<u8> {
        self.encode(extra)
    }

    fn decode_extra(&self, raw: &[u8], block: u64) -> ExtraResult<Extra> {
        self.decode(raw, block)
    }

    fn validate_additional(&self, extra: &Extra, header: &Header) -> ExtraResult<()> {
        ExtraCodec::validate_additional(self, extra, header)
    }

    fn extra_from_header(&self, header: &SealedHeader) -> ExtraResult<Extra> {
        ExtraCodec::extra_from_header(self, header)
    }

    fn seal_with_extra(&self, header: Header, extra: &Extra) -> SealedHeader {
        ExtraCodec::seal_with_extra(self, header, extra)
    }
}
