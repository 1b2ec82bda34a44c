//! # Element Tree Encoder
//!
//! An [`Item`] is the owned, encode-side form of the element tree: either an
//! atom (raw byte string) or a list of items. [`Item::encode`] produces the
//! canonical bytes.
//!
//! ## Prefix Rules
//!
//! | Value | Encoding |
//! |-------|----------|
//! | single byte `< 0x80` | the byte itself |
//! | atom, len 0..=55 | `0x80 + len`, bytes |
//! | atom, len > 55 | `0xb7 + len(len)`, BE len, bytes |
//! | list, payload 0..=55 | `0xc0 + len`, payload |
//! | list, payload > 55 | `0xf7 + len(len)`, BE len, payload |

use shared_types::U256;

use super::{LIST_LONG, LIST_SHORT, MAX_SHORT_LEN, SINGLE_BYTE_MAX, STRING_LONG, STRING_SHORT};

/// A node of the element tree, ready to be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Raw byte string.
    Bytes(Vec<u8>),
    /// Ordered sequence of child items.
    List(Vec<Item>),
}

impl Item {
    /// Atom holding a copy of `data`.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Item::Bytes(data.into())
    }

    /// The empty atom (`0x80`).
    pub fn null() -> Self {
        Item::Bytes(Vec::new())
    }

    /// The empty list (`0xc0`).
    pub fn null_list() -> Self {
        Item::List(Vec::new())
    }

    pub fn list(items: Vec<Item>) -> Self {
        Item::List(items)
    }

    /// Unsigned integer as minimal big-endian bytes; zero is the empty atom.
    pub fn uint(value: u64) -> Self {
        Item::Bytes(trim_leading_zeros(&value.to_be_bytes()).to_vec())
    }

    /// 256-bit unsigned integer, same minimal form as [`Item::uint`].
    pub fn u256(value: &U256) -> Self {
        let mut buf = [0u8; 32];
        value.to_big_endian(&mut buf);
        Item::Bytes(trim_leading_zeros(&buf).to_vec())
    }

    pub fn string(value: &str) -> Self {
        Item::Bytes(value.as_bytes().to_vec())
    }

    /// `0x01` for true, the empty atom for false.
    pub fn bool(value: bool) -> Self {
        if value {
            Item::Bytes(vec![1])
        } else {
            Item::null()
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Item::List(_))
    }

    /// Length of the payload, excluding this item's own prefix.
    pub fn payload_len(&self) -> usize {
        match self {
            Item::Bytes(data) => data.len(),
            Item::List(items) => items.iter().map(Item::encoded_len).sum(),
        }
    }

    /// Total length of the canonical encoding.
    pub fn encoded_len(&self) -> usize {
        match self {
            Item::Bytes(data) if data.len() == 1 && data[0] <= SINGLE_BYTE_MAX => 1,
            _ => {
                let payload = self.payload_len();
                prefix_len(payload) + payload
            }
        }
    }

    /// Canonical encoding of this item.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut out);
        out
    }

    /// Append the canonical encoding of this item to `out`.
    pub fn encode_to(&self, out: &mut Vec<u8>) {
        match self {
            Item::Bytes(data) => {
                if data.len() == 1 && data[0] <= SINGLE_BYTE_MAX {
                    out.push(data[0]);
                } else {
                    write_prefix(out, STRING_SHORT, STRING_LONG, data.len());
                    out.extend_from_slice(data);
                }
            }
            Item::List(items) => {
                write_prefix(out, LIST_SHORT, LIST_LONG, self.payload_len());
                for item in items {
                    item.encode_to(out);
                }
            }
        }
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

fn prefix_len(payload_len: usize) -> usize {
    if payload_len <= MAX_SHORT_LEN {
        1
    } else {
        1 + encode_length(payload_len).len()
    }
}

fn write_prefix(out: &mut Vec<u8>, short: u8, long: u8, payload_len: usize) {
    if payload_len <= MAX_SHORT_LEN {
        out.push(short + payload_len as u8);
    } else {
        let len_bytes = encode_length(payload_len);
        out.push(long + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}

/// Encode a length as minimal big-endian bytes.
fn encode_length(len: usize) -> Vec<u8> {
    trim_leading_zeros(&len.to_be_bytes()).to_vec()
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
