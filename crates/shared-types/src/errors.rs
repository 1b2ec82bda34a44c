//! # Error Types
//!
//! Errors raised when building primitives from untrusted slices.

use thiserror::Error;

/// Errors produced by primitive constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Slice does not have the width of the target primitive.
    #[error("Invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}
