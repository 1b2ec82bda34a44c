//! Transaction type tags and the typed-list framing shared by
//! transactions and receipts.

use qc_rlp::{Item, Value};
use serde::{Deserialize, Serialize};

use super::{CodecError, CodecResult};

/// Transaction type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TxType {
    /// Untagged, 9 fields.
    Legacy = 0x00,
    /// EIP-1559 style fee market, 12 fields.
    DynamicFee = 0x02,
    /// System transaction emitted by consensus, 7 fields.
    State = 0x7f,
}

impl TxType {
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn is_legacy(self) -> bool {
        self == TxType::Legacy
    }

    /// Decode a type atom, which must be exactly one byte.
    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let bytes = value.bytes()?;
        match bytes {
            [byte] => Self::try_from(*byte),
            _ => Err(CodecError::InvalidTxTypeSize(bytes.len())),
        }
    }
}

impl TryFrom<u8> for TxType {
    type Error = CodecError;

    fn try_from(byte: u8) -> CodecResult<Self> {
        match byte {
            0x00 => Ok(TxType::Legacy),
            0x02 => Ok(TxType::DynamicFee),
            0x7f => Ok(TxType::State),
            other => Err(CodecError::UnknownTxType(other)),
        }
    }
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxType::Legacy => write!(f, "legacy"),
            TxType::DynamicFee => write!(f, "dynamic-fee"),
            TxType::State => write!(f, "state"),
        }
    }
}

/// Walk a typed list.
///
/// A list element is a legacy object. A bytes element is a type tag and
/// the element after it is the tagged object's body.
pub(crate) fn decode_typed_list<'a, T>(
    value: &Value<'a>,
    mut decode: impl FnMut(TxType, &Value<'a>) -> CodecResult<T>,
) -> CodecResult<Vec<T>> {
    let elems = value.elems()?;
    let mut out = Vec::with_capacity(elems.len());
    let mut i = 0;

    while i < elems.len() {
        let elem = &elems[i];
        if elem.is_list() {
            out.push(decode(TxType::Legacy, elem)?);
            i += 1;
            continue;
        }

        let tx_type = TxType::from_value(elem)?;
        i += 1;
        let Some(body) = elems.get(i) else {
            return Err(CodecError::MissingTypedPayload(tx_type.as_byte()));
        };
        out.push(decode(tx_type, body)?);
        i += 1;
    }

    Ok(out)
}

/// Build a typed list from `(type, body)` pairs.
pub(crate) fn typed_list_item(entries: impl IntoIterator<Item = (TxType, Item)>) -> Item {
    let mut items = Vec::new();
    for (tx_type, body) in entries {
        if !tx_type.is_legacy() {
            items.push(Item::bytes(vec![tx_type.as_byte()]));
        }
        items.push(body);
    }
    Item::list(items)
}
