//! # Transactions
//!
//! A [`Transaction`] wraps one of the closed set of [`TxPayload`] variants
//! together with its hash. Like [`SealedHeader`](super::SealedHeader), the
//! hash is computed when the transaction is built or decoded and cannot be
//! invalidated afterwards; use [`Transaction::into_payload`] to edit.
//!
//! ## Framing
//!
//! - Standalone: legacy transactions are a bare list; typed transactions are
//!   the raw type byte followed by the list.
//! - Inside a transaction list: a one-byte atom holding the type precedes
//!   every typed transaction.

use qc_rlp::{decode_with, Decodable, Encodable, Item, Value, SINGLE_BYTE_MAX};
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, Hash, U256};

use super::typed::{decode_typed_list, typed_list_item};
use super::{expect_elems, CodecError, CodecResult, FieldContext, TxType};

pub const LEGACY_TX_FIELDS: usize = 9;
pub const DYNAMIC_FEE_TX_FIELDS: usize = 12;
pub const STATE_TX_FIELDS: usize = 7;

/// Recipient field: an atom that is a 20-byte address when present and
/// anything else when absent (contract creation).
fn decode_recipient(value: &Value<'_>, object: &'static str) -> CodecResult<Option<Address>> {
    // A list here is malformed, not contract creation.
    let bytes = value.bytes().field(object, "to")?;
    Ok(<Address>::try_from(bytes).ok())
}

fn recipient_item(to: &Option<Address>) -> Item {
    match to {
        Some(address) => Item::bytes(*address),
        None => Item::null(),
    }
}

/// Original transaction format.
///
/// `gas_price`, `value` and the signature values are 256-bit; an encoded
/// integer wider than 32 bytes is rejected with `IntegerTooLarge`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyTx {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Vec<u8>,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl LegacyTx {
    const OBJECT: &'static str = "legacy transaction";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let o = Self::OBJECT;
        let elems = expect_elems(value, o, LEGACY_TX_FIELDS)?;

        Ok(Self {
            nonce: elems[0].get_uint64().field(o, "nonce")?,
            gas_price: elems[1].get_u256().field(o, "gas_price")?,
            gas: elems[2].get_uint64().field(o, "gas")?,
            to: decode_recipient(&elems[3], o)?,
            value: elems[4].get_u256().field(o, "value")?,
            input: elems[5].get_bytes().field(o, "input")?,
            v: elems[6].get_u256().field(o, "v")?,
            r: elems[7].get_u256().field(o, "r")?,
            s: elems[8].get_u256().field(o, "s")?,
        })
    }
}

impl Encodable for LegacyTx {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::uint(self.nonce),
            Item::u256(&self.gas_price),
            Item::uint(self.gas),
            recipient_item(&self.to),
            Item::u256(&self.value),
            Item::bytes(self.input.clone()),
            Item::u256(&self.v),
            Item::u256(&self.r),
            Item::u256(&self.s),
        ])
    }
}

/// One entry of an access list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTuple {
    pub address: Address,
    pub storage_keys: Vec<Hash>,
}

pub type AccessList = Vec<AccessTuple>;

impl AccessTuple {
    const OBJECT: &'static str = "access tuple";

    fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let elems = expect_elems(value, Self::OBJECT, 2)?;
        let storage_keys = elems[1]
            .elems()
            .field(Self::OBJECT, "storage_keys")?
            .iter()
            .map(|key| key.get_hash().field(Self::OBJECT, "storage_keys"))
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            address: elems[0].get_address().field(Self::OBJECT, "address")?,
            storage_keys,
        })
    }
}

impl Encodable for AccessTuple {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::bytes(self.address),
            Item::list(self.storage_keys.iter().map(|k| Item::bytes(*k)).collect()),
        ])
    }
}

/// Fee-market transaction, tagged `0x02`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFeeTx {
    pub chain_id: U256,
    pub nonce: u64,
    pub gas_tip_cap: U256,
    pub gas_fee_cap: U256,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub input: Vec<u8>,
    pub access_list: AccessList,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl DynamicFeeTx {
    const OBJECT: &'static str = "dynamic fee transaction";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let o = Self::OBJECT;
        let elems = expect_elems(value, o, DYNAMIC_FEE_TX_FIELDS)?;

        let access_list = elems[8]
            .elems()
            .field(o, "access_list")?
            .iter()
            .map(AccessTuple::from_value)
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            chain_id: elems[0].get_u256().field(o, "chain_id")?,
            nonce: elems[1].get_uint64().field(o, "nonce")?,
            gas_tip_cap: elems[2].get_u256().field(o, "gas_tip_cap")?,
            gas_fee_cap: elems[3].get_u256().field(o, "gas_fee_cap")?,
            gas: elems[4].get_uint64().field(o, "gas")?,
            to: decode_recipient(&elems[5], o)?,
            value: elems[6].get_u256().field(o, "value")?,
            input: elems[7].get_bytes().field(o, "input")?,
            access_list,
            v: elems[9].get_u256().field(o, "v")?,
            r: elems[10].get_u256().field(o, "r")?,
            s: elems[11].get_u256().field(o, "s")?,
        })
    }
}

impl Encodable for DynamicFeeTx {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::u256(&self.chain_id),
            Item::uint(self.nonce),
            Item::u256(&self.gas_tip_cap),
            Item::u256(&self.gas_fee_cap),
            Item::uint(self.gas),
            recipient_item(&self.to),
            Item::u256(&self.value),
            Item::bytes(self.input.clone()),
            Item::list(self.access_list.iter().map(Encodable::rlp_item).collect()),
            Item::u256(&self.v),
            Item::u256(&self.r),
            Item::u256(&self.s),
        ])
    }
}

/// System transaction carrying validator signatures, tagged `0x7f`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTx {
    pub nonce: u64,
    pub to: Option<Address>,
    pub input: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl StateTx {
    const OBJECT: &'static str = "state transaction";

    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let o = Self::OBJECT;
        let elems = expect_elems(value, o, STATE_TX_FIELDS)?;

        let signatures = elems[3]
            .elems()
            .field(o, "signatures")?
            .iter()
            .map(|sig| sig.get_bytes().field(o, "signatures"))
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            nonce: elems[0].get_uint64().field(o, "nonce")?,
            to: decode_recipient(&elems[1], o)?,
            input: elems[2].get_bytes().field(o, "input")?,
            signatures,
            v: elems[4].get_u256().field(o, "v")?,
            r: elems[5].get_u256().field(o, "r")?,
            s: elems[6].get_u256().field(o, "s")?,
        })
    }
}

impl Encodable for StateTx {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::uint(self.nonce),
            recipient_item(&self.to),
            Item::bytes(self.input.clone()),
            Item::list(self.signatures.iter().cloned().map(Item::bytes).collect()),
            Item::u256(&self.v),
            Item::u256(&self.r),
            Item::u256(&self.s),
        ])
    }
}

/// The closed set of transaction bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TxPayload {
    Legacy(LegacyTx),
    DynamicFee(DynamicFeeTx),
    State(StateTx),
}

impl TxPayload {
    pub fn tx_type(&self) -> TxType {
        match self {
            TxPayload::Legacy(_) => TxType::Legacy,
            TxPayload::DynamicFee(_) => TxType::DynamicFee,
            TxPayload::State(_) => TxType::State,
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            TxPayload::Legacy(tx) => tx.nonce,
            TxPayload::DynamicFee(tx) => tx.nonce,
            TxPayload::State(tx) => tx.nonce,
        }
    }

    pub fn to(&self) -> Option<Address> {
        match self {
            TxPayload::Legacy(tx) => tx.to,
            TxPayload::DynamicFee(tx) => tx.to,
            TxPayload::State(tx) => tx.to,
        }
    }

    /// Decode the body of a transaction whose type is already known.
    pub fn from_value(tx_type: TxType, value: &Value<'_>) -> CodecResult<Self> {
        Ok(match tx_type {
            TxType::Legacy => TxPayload::Legacy(LegacyTx::from_value(value)?),
            TxType::DynamicFee => TxPayload::DynamicFee(DynamicFeeTx::from_value(value)?),
            TxType::State => TxPayload::State(StateTx::from_value(value)?),
        })
    }
}

impl Encodable for TxPayload {
    fn rlp_item(&self) -> Item {
        match self {
            TxPayload::Legacy(tx) => tx.rlp_item(),
            TxPayload::DynamicFee(tx) => tx.rlp_item(),
            TxPayload::State(tx) => tx.rlp_item(),
        }
    }
}

impl From<LegacyTx> for TxPayload {
    fn from(tx: LegacyTx) -> Self {
        TxPayload::Legacy(tx)
    }
}

impl From<DynamicFeeTx> for TxPayload {
    fn from(tx: DynamicFeeTx) -> Self {
        TxPayload::DynamicFee(tx)
    }
}

impl From<StateTx> for TxPayload {
    fn from(tx: StateTx) -> Self {
        TxPayload::State(tx)
    }
}

/// A transaction payload with its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    payload: TxPayload,
    hash: Hash,
}

impl Transaction {
    pub fn new(payload: impl Into<TxPayload>) -> Self {
        let payload = payload.into();
        let hash = keccak256(&encode_payload(&payload));
        Self { payload, hash }
    }

    pub fn payload(&self) -> &TxPayload {
        &self.payload
    }

    /// Give up the cached hash to allow mutation.
    pub fn into_payload(self) -> TxPayload {
        self.payload
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn tx_type(&self) -> TxType {
        self.payload.tx_type()
    }

    /// Standalone encoding: the raw type byte, if typed, then the body.
    pub fn encode(&self) -> Vec<u8> {
        encode_payload(&self.payload)
    }

    /// Decode a standalone transaction. A leading byte at or below `0x7f`
    /// is a type tag; anything else starts a legacy body.
    pub fn decode(input: &[u8]) -> CodecResult<Self> {
        let (tx_type, body) = match input.split_first() {
            Some((&first, rest)) if first <= SINGLE_BYTE_MAX => (TxType::try_from(first)?, rest),
            _ => (TxType::Legacy, input),
        };
        decode_with(body, |value| Self::from_tagged_value(tx_type, value))
    }

    /// Decode a body whose type came from surrounding framing.
    pub fn from_tagged_value(tx_type: TxType, value: &Value<'_>) -> CodecResult<Self> {
        Ok(Self::new(TxPayload::from_value(tx_type, value)?))
    }
}

fn encode_payload(payload: &TxPayload) -> Vec<u8> {
    let body = payload.rlp_item();
    let tx_type = payload.tx_type();
    if tx_type.is_legacy() {
        return body.encode();
    }
    let mut out = Vec::with_capacity(1 + body.encoded_len());
    out.push(tx_type.as_byte());
    body.encode_to(&mut out);
    out
}

/// Element-tree form of a transaction list, with type atoms.
pub fn transactions_item(txs: &[Transaction]) -> Item {
    typed_list_item(
        txs.iter()
            .map(|tx| (tx.tx_type(), tx.payload.rlp_item())),
    )
}

/// Encode a transaction list.
pub fn encode_transactions(txs: &[Transaction]) -> Vec<u8> {
    transactions_item(txs).encode()
}

/// Decode a transaction list from a parsed element.
pub fn transactions_from_value(value: &Value<'_>) -> CodecResult<Vec<Transaction>> {
    decode_typed_list(value, Transaction::from_tagged_value)
}

/// Decode a transaction list from raw bytes.
pub fn decode_transactions(input: &[u8]) -> CodecResult<Vec<Transaction>> {
    decode_with(input, transactions_from_value)
}

impl Decodable for Transaction {
    type Error = CodecError;

    /// Nested decode of a list element, which is always a legacy body.
    fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        Self::from_tagged_value(TxType::Legacy, value)
    }

    fn decode_rlp(input: &[u8]) -> CodecResult<Self> {
        Self::decode(input)
    }
}
