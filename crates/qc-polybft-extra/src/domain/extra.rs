//! # Extra Data Model
//!
//! Consensus metadata carried in a header's extra field, and the base
//! fields every fork variant encodes first.
//!
//! ## Base Fields (wire order)
//!
//! | # | Field | Absent as |
//! |---|-------|-----------|
//! | 0 | validators | empty list |
//! | 1 | parent | empty atom |
//! | 2 | committed | empty atom |
//! | 3 | checkpoint | empty list |
//!
//! The block number is not on the wire. It comes from the header being
//! decoded and selects the variant.

use qc_chain_codec::{expect_elems, CodecResult, FieldContext};
use qc_rlp::{Encodable, Item, RlpError, Value};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

use super::ExtraResult;

/// Number of base fields shared by every variant.
pub const BASE_FIELDS: usize = 4;

/// Zero-filled prefix in front of the encoded extra.
pub const EXTRA_VANITY: usize = 32;

/// Aggregated BLS signature over a block and the signer bitmap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub aggregated_signature: Vec<u8>,
    pub bitmap: Vec<u8>,
}

impl Signature {
    const OBJECT: &'static str = "signature";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let elems = expect_elems(value, Self::OBJECT, 2)?;
        Ok(Self {
            aggregated_signature: elems[0]
                .get_bytes()
                .field(Self::OBJECT, "aggregated_signature")?,
            bitmap: elems[1].get_bytes().field(Self::OBJECT, "bitmap")?,
        })
    }
}

impl Encodable for Signature {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::bytes(self.aggregated_signature.clone()),
            Item::bytes(self.bitmap.clone()),
        ])
    }
}

/// Checkpoint committed by the validator set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointData {
    pub block_round: u64,
    pub epoch_number: u64,
    pub current_validators_hash: Hash,
    pub next_validators_hash: Hash,
    pub event_root: Hash,
}

impl CheckpointData {
    const OBJECT: &'static str = "checkpoint";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let o = Self::OBJECT;
        let elems = expect_elems(value, o, 5)?;
        Ok(Self {
            block_round: elems[0].get_uint64().field(o, "block_round")?,
            epoch_number: elems[1].get_uint64().field(o, "epoch_number")?,
            current_validators_hash: elems[2].get_hash().field(o, "current_validators_hash")?,
            next_validators_hash: elems[3].get_hash().field(o, "next_validators_hash")?,
            event_root: elems[4].get_hash().field(o, "event_root")?,
        })
    }
}

impl Encodable for CheckpointData {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::uint(self.block_round),
            Item::uint(self.epoch_number),
            Item::bytes(self.current_validators_hash),
            Item::bytes(self.next_validators_hash),
            Item::bytes(self.event_root),
        ])
    }
}

/// One validator entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorMetadata {
    pub address: Address,
    pub bls_key: Vec<u8>,
    pub voting_power: U256,
    pub is_active: bool,
}

impl ValidatorMetadata {
    const OBJECT: &'static str = "validator";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let o = Self::OBJECT;
        let elems = expect_elems(value, o, 4)?;
        Ok(Self {
            address: elems[0].get_address().field(o, "address")?,
            bls_key: elems[1].get_bytes().field(o, "bls_key")?,
            voting_power: elems[2].get_u256().field(o, "voting_power")?,
            is_active: elems[3].get_bool().field(o, "is_active")?,
        })
    }
}

impl Encodable for ValidatorMetadata {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::bytes(self.address),
            Item::bytes(self.bls_key.clone()),
            Item::u256(&self.voting_power),
            Item::bool(self.is_active),
        ])
    }
}

/// Changes to the validator set taking effect at an epoch boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSetDelta {
    pub added: Vec<ValidatorMetadata>,
    pub updated: Vec<ValidatorMetadata>,
    /// Bitmap over the current set.
    pub removed: Vec<u8>,
}

impl ValidatorSetDelta {
    const OBJECT: &'static str = "validator set delta";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let o = Self::OBJECT;
        let elems = expect_elems(value, o, 3)?;

        Ok(Self {
            added: Self::decode_set(&elems[0], "added")?,
            updated: Self::decode_set(&elems[1], "updated")?,
            removed: elems[2].get_bytes().field(o, "removed")?,
        })
    }

    fn decode_set(value: &Value<'_>, field: &'static str) -> CodecResult<Vec<ValidatorMetadata>> {
        value
            .elems()
            .field(Self::OBJECT, field)?
            .iter()
            .map(ValidatorMetadata::from_value)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

impl Encodable for ValidatorSetDelta {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::list(self.added.iter().map(Encodable::rlp_item).collect()),
            Item::list(self.updated.iter().map(Encodable::rlp_item).collect()),
            Item::bytes(self.removed.clone()),
        ])
    }
}

/// Header extra data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    /// Height of the owning header; selects the variant, never encoded.
    pub block_number: u64,
    pub validators: Option<ValidatorSetDelta>,
    pub parent: Option<Signature>,
    pub committed: Option<Signature>,
    pub checkpoint: Option<CheckpointData>,
    /// Variant-specific fields, appended after the base fields.
    pub fork_fields: Vec<String>,
}

impl Extra {
    pub fn new(block_number: u64) -> Self {
        Self {
            block_number,
            ..Default::default()
        }
    }

    /// Copy for the signing payload: committed signature reset to its empty
    /// placeholder, every other field kept as is.
    pub fn clean(&self) -> Self {
        Self {
            committed: Some(Signature::default()),
            ..self.clone()
        }
    }

    pub fn with_fork_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fork_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn base_items(&self) -> Vec<Item> {
        vec![
            self.validators
                .as_ref()
                .map_or_else(Item::null_list, Encodable::rlp_item),
            self.parent
                .as_ref()
                .map_or_else(Item::null, Encodable::rlp_item),
            self.committed
                .as_ref()
                .map_or_else(Item::null, Encodable::rlp_item),
            self.checkpoint
                .as_ref()
                .map_or_else(Item::null_list, Encodable::rlp_item),
        ]
    }

    /// Read the base fields from the first [`BASE_FIELDS`] elements.
    pub(crate) fn from_base_elems(elems: &[Value<'_>], block_number: u64) -> ExtraResult<Self> {
        Ok(Self {
            block_number,
            validators: optional(&elems[0], Absent::EmptyList, ValidatorSetDelta::from_value)?,
            parent: optional(&elems[1], Absent::EmptyAtom, Signature::from_value)?,
            committed: optional(&elems[2], Absent::EmptyAtom, Signature::from_value)?,
            checkpoint: optional(&elems[3], Absent::EmptyList, CheckpointData::from_value)?,
            fork_fields: Vec::new(),
        })
    }
}

/// Wire marker of an absent base field.
#[derive(Debug, Clone, Copy)]
enum Absent {
    EmptyList,
    EmptyAtom,
}

/// Decode an optional base field. Only the marker `base_items` writes for
/// the field reads as `None`; the other empty form is rejected.
fn optional<T>(
    value: &Value<'_>,
    absent: Absent,
    decode: impl FnOnce(&Value<'_>) -> CodecResult<T>,
) -> ExtraResult<Option<T>> {
    match absent {
        Absent::EmptyList => {
            if !value.is_list() {
                return Err(RlpError::ExpectedList.into());
            }
            if value.elem_count() == 0 {
                return Ok(None);
            }
        }
        Absent::EmptyAtom => {
            if value.is_list() && value.elem_count() == 0 {
                return Err(RlpError::ExpectedBytes.into());
            }
            if value.is_bytes() && value.bytes()?.is_empty() {
                return Ok(None);
            }
        }
    }
    Ok(Some(decode(value)?))
}
