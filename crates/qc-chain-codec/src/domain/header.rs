//! # Block Header
//!
//! [`Header`] is plain data. [`SealedHeader`] pairs it with the Keccak-256
//! of its canonical encoding; the pair can only be produced by
//! [`Header::seal`] or by decoding, so the cached hash never goes stale.
//! To change a sealed header, `unseal()` it, edit, and seal again.

use std::ops::Deref;

use qc_rlp::{decode_with, Decodable, Encodable, Item, Value};
use serde::{Deserialize, Serialize};
use shared_types::{
    keccak256, nonce_from_u64, nonce_to_u64, Address, Bloom, Hash, Nonce, EMPTY_UNCLE_HASH,
};

use super::{expect_elems, CodecError, CodecResult, FieldContext};

/// Number of encoded header fields.
pub const HEADER_FIELDS: usize = 15;

const OBJECT: &str = "header";

/// Block header, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub parent_hash: Hash,
    pub sha3_uncles: Hash,
    pub miner: Address,
    pub state_root: Hash,
    pub tx_root: Hash,
    pub receipts_root: Hash,
    pub logs_bloom: Bloom,
    pub difficulty: u64,
    pub number: u64,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    /// Fork-versioned consensus payload, see the extra-data crate.
    pub extra_data: Vec<u8>,
    pub mix_hash: Hash,
    pub nonce: Nonce,
}

impl Header {
    /// Header with the empty-uncles hash filled in and every other field zero.
    pub fn empty(number: u64) -> Self {
        Self {
            number,
            sha3_uncles: EMPTY_UNCLE_HASH,
            ..Default::default()
        }
    }

    pub fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce_from_u64(nonce);
    }

    pub fn nonce_u64(&self) -> u64 {
        nonce_to_u64(&self.nonce)
    }

    pub fn encode(&self) -> Vec<u8> {
        self.rlp_item().encode()
    }

    /// Keccak-256 of the canonical encoding.
    pub fn compute_hash(&self) -> Hash {
        keccak256(&self.encode())
    }

    /// Compute the hash and freeze the header.
    pub fn seal(self) -> SealedHeader {
        let hash = self.compute_hash();
        SealedHeader { header: self, hash }
    }

    /// Decode the 15 header fields from a parsed element.
    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let elems = expect_elems(value, OBJECT, HEADER_FIELDS)?;

        Ok(Self {
            parent_hash: elems[0].get_hash().field(OBJECT, "parent_hash")?,
            sha3_uncles: elems[1].get_hash().field(OBJECT, "sha3_uncles")?,
            miner: elems[2].get_address().field(OBJECT, "miner")?,
            state_root: elems[3].get_hash().field(OBJECT, "state_root")?,
            tx_root: elems[4].get_hash().field(OBJECT, "tx_root")?,
            receipts_root: elems[5].get_hash().field(OBJECT, "receipts_root")?,
            logs_bloom: elems[6].get_bloom().field(OBJECT, "logs_bloom")?,
            difficulty: elems[7].get_uint64().field(OBJECT, "difficulty")?,
            number: elems[8].get_uint64().field(OBJECT, "number")?,
            gas_limit: elems[9].get_uint64().field(OBJECT, "gas_limit")?,
            gas_used: elems[10].get_uint64().field(OBJECT, "gas_used")?,
            timestamp: elems[11].get_uint64().field(OBJECT, "timestamp")?,
            extra_data: elems[12].get_bytes().field(OBJECT, "extra_data")?,
            mix_hash: elems[13].get_hash().field(OBJECT, "mix_hash")?,
            nonce: elems[14].get_fixed::<8>().field(OBJECT, "nonce")?,
        })
    }
}

impl Encodable for Header {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::bytes(self.parent_hash),
            Item::bytes(self.sha3_uncles),
            Item::bytes(self.miner),
            Item::bytes(self.state_root),
            Item::bytes(self.tx_root),
            Item::bytes(self.receipts_root),
            Item::bytes(self.logs_bloom.0),
            Item::uint(self.difficulty),
            Item::uint(self.number),
            Item::uint(self.gas_limit),
            Item::uint(self.gas_used),
            Item::uint(self.timestamp),
            Item::bytes(self.extra_data.clone()),
            Item::bytes(self.mix_hash),
            Item::bytes(self.nonce),
        ])
    }
}

/// A header together with its cached hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SealedHeader {
    header: Header,
    hash: Hash,
}

impl SealedHeader {
    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Give up the cached hash to allow mutation.
    pub fn unseal(self) -> Header {
        self.header
    }

    pub fn encode(&self) -> Vec<u8> {
        self.header.encode()
    }

    /// Decode from a parsed element; the hash is computed last.
    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        Ok(Header::from_value(value)?.seal())
    }

    /// Decode from raw bytes.
    pub fn decode(input: &[u8]) -> CodecResult<Self> {
        decode_with(input, Self::from_value)
    }
}

impl Deref for SealedHeader {
    type Target = Header;

    fn deref(&self) -> &Header {
        &self.header
    }
}

impl Encodable for SealedHeader {
    fn rlp_item(&self) -> Item {
        self.header.rlp_item()
    }
}

impl Decodable for SealedHeader {
    type Error = CodecError;

    fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        SealedHeader::from_value(value)
    }
}
