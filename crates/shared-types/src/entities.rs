//! # Core Primitives
//!
//! Fixed-width values carried by chain objects.
//!
//! ## Widths
//!
//! - **Hash**: 32 bytes (Keccak-256 output, trie roots, topics)
//! - **Address**: 20 bytes (miner, recipients, log emitters)
//! - **Bloom**: 256 bytes (logs bloom in headers and receipts)
//! - **Nonce**: 8 bytes (header seal nonce, carried verbatim)

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use crate::errors::PrimitiveError;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// A 32-byte hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// The 8-byte header nonce.
pub type Nonce = [u8; 8];

/// Length of a [`Hash`] in bytes.
pub const HASH_LENGTH: usize = 32;

/// Length of an [`Address`] in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Length of a [`Bloom`] in bytes.
pub const BLOOM_LENGTH: usize = 256;

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; HASH_LENGTH];

/// The all-zero address.
pub const ZERO_ADDRESS: Address = [0u8; ADDRESS_LENGTH];

/// A 2048-bit logs bloom filter.
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bloom(#[serde_as(as = "Bytes")] pub [u8; BLOOM_LENGTH]);

impl Bloom {
    /// Build a bloom from a slice that must be exactly 256 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PrimitiveError> {
        let inner: [u8; BLOOM_LENGTH] =
            bytes
                .try_into()
                .map_err(|_| PrimitiveError::InvalidLength {
                    kind: "bloom",
                    expected: BLOOM_LENGTH,
                    actual: bytes.len(),
                })?;
        Ok(Self(inner))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// True when no bit is set.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl Default for Bloom {
    fn default() -> Self {
        Self([0u8; BLOOM_LENGTH])
    }
}

impl std::fmt::Debug for Bloom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bloom(0x{})", hex::encode(self.0))
    }
}

/// Copy a 32-byte slice into a [`Hash`].
pub fn hash_from_slice(bytes: &[u8]) -> Result<Hash, PrimitiveError> {
    bytes.try_into().map_err(|_| PrimitiveError::InvalidLength {
        kind: "hash",
        expected: HASH_LENGTH,
        actual: bytes.len(),
    })
}

/// Copy a 20-byte slice into an [`Address`].
pub fn address_from_slice(bytes: &[u8]) -> Result<Address, PrimitiveError> {
    bytes.try_into().map_err(|_| PrimitiveError::InvalidLength {
        kind: "address",
        expected: ADDRESS_LENGTH,
        actual: bytes.len(),
    })
}

/// Parse a `0x`-prefixed (or bare) hex string into a [`Hash`].
pub fn hash_from_hex(s: &str) -> Result<Hash, PrimitiveError> {
    let raw = hex::decode(s.trim_start_matches("0x"))
        .map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
    hash_from_slice(&raw)
}

/// Big-endian header nonce from a u64.
pub fn nonce_from_u64(value: u64) -> Nonce {
    value.to_be_bytes()
}

/// Header nonce as a u64.
pub fn nonce_to_u64(nonce: &Nonce) -> u64 {
    u64::from_be_bytes(*nonce)
}

/// Lower-case `0x`-prefixed hex, used in log fields.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
