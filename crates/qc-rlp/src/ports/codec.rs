//! Encode/decode contracts for types with a canonical encoding.

use crate::domain::{decode_with, Item, RlpError, Value};

/// A type that maps onto the element tree.
pub trait Encodable {
    /// Element-tree form, used when nesting inside a parent object.
    fn rlp_item(&self) -> Item;

    /// Canonical bytes.
    fn rlp_bytes(&self) -> Vec<u8> {
        self.rlp_item().encode()
    }
}

/// A type that can be rebuilt from the element tree.
pub trait Decodable: Sized {
    type Error: From<RlpError>;

    /// Decode from an already parsed element (nested decoding).
    fn from_value(value: &Value<'_>) -> Result<Self, Self::Error>;

    /// Decode from raw bytes using a pooled parser.
    fn decode_rlp(input: &[u8]) -> Result<Self, Self::Error> {
        decode_with(input, Self::from_value)
    }
}

impl Encodable for Item {
    fn rlp_item(&self) -> Item {
        self.clone()
    }
}

impl Encodable for u64 {
    fn rlp_item(&self) -> Item {
        Item::uint(*self)
    }
}

impl Decodable for u64 {
    type Error = RlpError;

    fn from_value(value: &Value<'_>) -> Result<Self, RlpError> {
        value.get_uint64()
    }
}

impl Encodable for String {
    fn rlp_item(&self) -> Item {
        Item::string(self)
    }
}

impl Decodable for String {
    type Error = RlpError;

    fn from_value(value: &Value<'_>) -> Result<Self, RlpError> {
        value.get_string()
    }
}
