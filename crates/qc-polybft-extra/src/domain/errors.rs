use qc_chain_codec::CodecError;
use qc_rlp::RlpError;

use super::ExtraHandler;

/// Extra-data errors. All of them describe bad input or configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtraError {
    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("wrong extra size: {0}")]
    ExtraTooShort(usize),

    #[error(
        "incorrect element count to decode {handler} extra, expected {expected} but found {actual}"
    )]
    ElementCount {
        handler: ExtraHandler,
        expected: usize,
        actual: usize,
    },

    #[error("fork field {index} is empty for block {block}")]
    EmptyForkField { index: usize, block: u64 },

    #[error("nikaragva activates at {nikaragva}, before london at {london}")]
    InvalidSchedule { london: u64, nikaragva: u64 },
}

/// Result type for extra-data operations
pub type ExtraResult<T> = Result<T, ExtraError>;
