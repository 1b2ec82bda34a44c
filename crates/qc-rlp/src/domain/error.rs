//! Error types for the binary codec.

use thiserror::Error;

/// Malformed-input errors raised while parsing or extracting values.
///
/// All variants are recoverable: the caller decides whether to drop the
/// source of the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("Unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    #[error("Length prefix of {0} bytes does not fit in usize")]
    LengthOverflow(usize),

    #[error("Non-canonical size prefix at offset {offset}")]
    NonCanonicalSize { offset: usize },

    #[error("Non-canonical single byte 0x{byte:02x} at offset {offset}")]
    NonCanonicalSingleByte { byte: u8, offset: usize },

    #[error("Trailing bytes after root element: {remaining}")]
    TrailingBytes { remaining: usize },

    #[error("Expected list, found bytes")]
    ExpectedList,

    #[error("Expected bytes, found list")]
    ExpectedBytes,

    #[error("Integer encoding has a leading zero byte")]
    LeadingZero,

    #[error("Integer too large: {actual} bytes, max {max}")]
    IntegerTooLarge { max: usize, actual: usize },

    #[error("Wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Nesting exceeds {0} levels")]
    TooDeep(usize),

    #[error("Invalid UTF-8 string")]
    InvalidUtf8,

    #[error("Invalid bool encoding")]
    InvalidBool,
}

/// Result type for codec operations
pub type RlpResult<T> = Result<T, RlpError>;
