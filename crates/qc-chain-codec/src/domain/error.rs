//! Error types for the chain object codec

use qc_rlp::{RlpError, Value};

/// Chain object decode errors.
///
/// Every variant describes malformed or unsupported input and is
/// recoverable; the caller decides whether to reject the source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Rlp(#[from] RlpError),

    #[error("Invalid {object} field {field}: {source}")]
    Field {
        object: &'static str,
        field: &'static str,
        source: RlpError,
    },

    #[error("Incorrect element count to decode {object}, expected {expected} but found {actual}")]
    ElementCount {
        object: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown transaction type: 0x{0:02x}")]
    UnknownTxType(u8),

    #[error("Expected 1 byte transaction type, but size is {0}")]
    InvalidTxTypeSize(usize),

    #[error("Type tag 0x{0:02x} is the last element, payload missing")]
    MissingTypedPayload(u8),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Attach object/field context to a low-level extraction error.
pub trait FieldContext<T> {
    fn field(self, object: &'static str, field: &'static str) -> CodecResult<T>;
}

impl<T> FieldContext<T> for Result<T, RlpError> {
    fn field(self, object: &'static str, field: &'static str) -> CodecResult<T> {
        self.map_err(|source| CodecError::Field {
            object,
            field,
            source,
        })
    }
}

/// Children of `value`, which must be a list of exactly `expected` elements.
pub fn expect_elems<'a>(
    value: &Value<'a>,
    object: &'static str,
    expected: usize,
) -> CodecResult<Vec<Value<'a>>> {
    let elems = value.elems()?;
    if elems.len() != expected {
        return Err(CodecError::ElementCount {
            object,
            expected,
            actual: elems.len(),
        });
    }
    Ok(elems)
}
