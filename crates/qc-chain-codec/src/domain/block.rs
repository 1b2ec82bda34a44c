//! Blocks: a sealed header, its transactions and uncle headers.

use qc_rlp::{decode_with, Decodable, Encodable, Item, Value};
use serde::Serialize;
use shared_types::Hash;
use tracing::debug;

use super::{
    expect_elems, transactions_from_value, transactions_item, CodecError, CodecResult,
    FieldContext, SealedHeader, Transaction,
};

pub const BLOCK_FIELDS: usize = 3;

const OBJECT: &str = "block";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub header: SealedHeader,
    pub transactions: Vec<Transaction>,
    pub uncles: Vec<SealedHeader>,
}

impl Block {
    pub fn new(header: SealedHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
            uncles: Vec::new(),
        }
    }

    /// Block hash, which is the header hash.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn number(&self) -> u64 {
        self.header.number
    }

    pub fn encode(&self) -> Vec<u8> {
        self.rlp_item().encode()
    }

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let elems = expect_elems(value, OBJECT, BLOCK_FIELDS)?;

        let header = SealedHeader::from_value(&elems[0])?;
        let transactions = transactions_from_value(&elems[1])?;
        let uncles = elems[2]
            .elems()
            .field(OBJECT, "uncles")?
            .iter()
            .map(SealedHeader::from_value)
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            header,
            transactions,
            uncles,
        })
    }

    pub fn decode(input: &[u8]) -> CodecResult<Self> {
        decode_with(input, Self::from_value).map_err(|err| {
            debug!(len = input.len(), error = %err, "[qc-chain-codec] block decode failed");
            err
        })
    }
}

impl Encodable for Block {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            self.header.rlp_item(),
            transactions_item(&self.transactions),
            Item::list(self.uncles.iter().map(Encodable::rlp_item).collect()),
        ])
    }
}

impl Decodable for Block {
    type Error = CodecError;

    fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        Block::from_value(value)
    }
}
