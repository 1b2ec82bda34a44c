//! # Receipts
//!
//! The first receipt field is either a post-state root (32 bytes) or an
//! execution status byte, kept as is. Any length other than 32 or 1 decodes
//! as a failed status, which also covers the empty atom a failed status
//! encodes to.

use qc_rlp::{decode_with, Encodable, Item, Value, SINGLE_BYTE_MAX};
use serde::{Deserialize, Serialize};
use shared_types::{Bloom, Hash, HASH_LENGTH};

use super::typed::{decode_typed_list, typed_list_item};
use super::{expect_elems, CodecResult, FieldContext, Log, TxType};

pub const RECEIPT_FIELDS: usize = 4;

const OBJECT: &str = "receipt";

/// Raw execution status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptStatus(pub u8);

impl ReceiptStatus {
    pub const FAILED: ReceiptStatus = ReceiptStatus(0);
    pub const SUCCESS: ReceiptStatus = ReceiptStatus(1);

    pub fn is_success(self) -> bool {
        self.0 != 0
    }
}

impl From<u8> for ReceiptStatus {
    fn from(byte: u8) -> Self {
        ReceiptStatus(byte)
    }
}

/// Post-state root or execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptOutcome {
    Root(Hash),
    Status(ReceiptStatus),
}

impl ReceiptOutcome {
    fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let bytes = value.bytes().field(OBJECT, "outcome")?;
        match bytes.len() {
            HASH_LENGTH => {
                let mut root = [0u8; HASH_LENGTH];
                root.copy_from_slice(bytes);
                Ok(ReceiptOutcome::Root(root))
            }
            1 => Ok(ReceiptOutcome::Status(ReceiptStatus::from(bytes[0]))),
            _ => Ok(ReceiptOutcome::Status(ReceiptStatus::FAILED)),
        }
    }

    fn rlp_item(&self) -> Item {
        match self {
            ReceiptOutcome::Root(root) => Item::bytes(*root),
            ReceiptOutcome::Status(status) => Item::uint(u64::from(status.0)),
        }
    }
}

impl Default for ReceiptOutcome {
    fn default() -> Self {
        ReceiptOutcome::Status(ReceiptStatus::FAILED)
    }
}

/// Execution receipt of one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub outcome: ReceiptOutcome,
    pub cumulative_gas_used: u64,
    pub logs_bloom: Bloom,
    pub logs: Vec<Log>,
    /// Framing only; not part of the four encoded fields.
    pub tx_type: TxType,
}

impl Default for Receipt {
    fn default() -> Self {
        Self {
            outcome: ReceiptOutcome::default(),
            cumulative_gas_used: 0,
            logs_bloom: Bloom::default(),
            logs: Vec::new(),
            tx_type: TxType::Legacy,
        }
    }
}

impl Receipt {
    pub fn status(&self) -> Option<ReceiptStatus> {
        match self.outcome {
            ReceiptOutcome::Status(status) => Some(status),
            ReceiptOutcome::Root(_) => None,
        }
    }

    /// Decode the four receipt fields; `tx_type` comes from framing.
    pub fn from_tagged_value(tx_type: TxType, value: &Value<'_>) -> CodecResult<Self> {
        let elems = expect_elems(value, OBJECT, RECEIPT_FIELDS)?;

        let logs = elems[3]
            .elems()
            .field(OBJECT, "logs")?
            .iter()
            .map(Log::from_value)
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            outcome: ReceiptOutcome::from_value(&elems[0])?,
            cumulative_gas_used: elems[1].get_uint64().field(OBJECT, "cumulative_gas_used")?,
            logs_bloom: elems[2].get_bloom().field(OBJECT, "logs_bloom")?,
            logs,
            tx_type,
        })
    }

    /// Standalone encoding, prefixed by the raw type byte when typed.
    pub fn encode(&self) -> Vec<u8> {
        let body = self.rlp_item();
        if self.tx_type.is_legacy() {
            return body.encode();
        }
        let mut out = Vec::with_capacity(1 + body.encoded_len());
        out.push(self.tx_type.as_byte());
        body.encode_to(&mut out);
        out
    }

    /// Decode a standalone receipt, honoring a leading type byte.
    pub fn decode(input: &[u8]) -> CodecResult<Self> {
        let (tx_type, body) = match input.split_first() {
            Some((&first, rest)) if first <= SINGLE_BYTE_MAX => (TxType::try_from(first)?, rest),
            _ => (TxType::Legacy, input),
        };
        decode_with(body, |value| Self::from_tagged_value(tx_type, value))
    }
}

impl Encodable for Receipt {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            self.outcome.rlp_item(),
            Item::uint(self.cumulative_gas_used),
            Item::bytes(self.logs_bloom.0),
            Item::list(self.logs.iter().map(Encodable::rlp_item).collect()),
        ])
    }
}

/// Element-tree form of a receipt list, with type atoms.
pub fn receipts_item(receipts: &[Receipt]) -> Item {
    typed_list_item(receipts.iter().map(|r| (r.tx_type, r.rlp_item())))
}

pub fn encode_receipts(receipts: &[Receipt]) -> Vec<u8> {
    receipts_item(receipts).encode()
}

pub fn receipts_from_value(value: &Value<'_>) -> CodecResult<Vec<Receipt>> {
    decode_typed_list(value, Receipt::from_tagged_value)
}

pub fn decode_receipts(input: &[u8]) -> CodecResult<Vec<Receipt>> {
    decode_with(input, receipts_from_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    fn receipt(outcome: ReceiptOutcome, tx_type: TxType) -> Receipt {
        let mut logs_bloom = Bloom::default();
        logs_bloom.0[255] = 0x01;
        Receipt {
            outcome,
            cumulative_gas_used: 63_000,
            logs_bloom,
            logs: vec![Log {
                address: [0x10; 20],
                topics: vec![[0x20; 32]],
                data: vec![1, 2, 3],
            }],
            tx_type,
        }
    }

    fn with_outcome_atom(atom: Item) -> Vec<u8> {
        let Item::List(mut fields) =
            receipt(ReceiptOutcome::default(), TxType::Legacy).rlp_item()
        else {
            unreachable!()
        };
        fields[0] = atom;
        Item::list(fields).encode()
    }

    #[test]
    fn test_receipt_roundtrip_each_outcome() {
        for outcome in [
            ReceiptOutcome::Root([0x77; 32]),
            ReceiptOutcome::Status(ReceiptStatus::SUCCESS),
            ReceiptOutcome::Status(ReceiptStatus::FAILED),
        ] {
            let r = receipt(outcome, TxType::Legacy);
            assert_eq!(Receipt::decode(&r.encode()).unwrap(), r);
        }
    }

    #[test]
    fn test_failed_status_encodes_empty() {
        let r = receipt(ReceiptOutcome::Status(ReceiptStatus::FAILED), TxType::Legacy);
        let Item::List(fields) = r.rlp_item() else {
            unreachable!()
        };
        assert_eq!(fields[0].encode(), vec![0x80]);
    }

    #[test]
    fn test_outcome_fallback_to_failed() {
        let decoded = Receipt::decode(&with_outcome_atom(Item::bytes(vec![1, 2, 3]))).unwrap();
        assert_eq!(decoded.status(), Some(ReceiptStatus::FAILED));
    }

    #[test]
    fn test_outcome_status_byte_range() {
        let decoded = Receipt::decode(&with_outcome_atom(Item::bytes(vec![0x00]))).unwrap();
        assert_eq!(decoded.status(), Some(ReceiptStatus::FAILED));

        let raw = with_outcome_atom(Item::bytes(vec![0x02]));
        let decoded = Receipt::decode(&raw).unwrap();
        assert_eq!(decoded.status(), Some(ReceiptStatus(0x02)));
        assert!(decoded.status().is_some_and(ReceiptStatus::is_success));
        assert_eq!(decoded.encode(), raw);

        let high = with_outcome_atom(Item::bytes(vec![0xff]));
        assert_eq!(
            Receipt::decode(&high).unwrap().status(),
            Some(ReceiptStatus(0xff))
        );
    }

    #[test]
    fn test_outcome_must_be_atom() {
        let err = Receipt::decode(&with_outcome_atom(Item::null_list())).unwrap_err();
        assert!(matches!(err, CodecError::Field { field: "outcome", .. }));
    }

    #[test]
    fn test_typed_receipt_standalone() {
        let r = receipt(ReceiptOutcome::Status(ReceiptStatus::SUCCESS), TxType::State);
        let encoded = r.encode();
        assert_eq!(encoded[0], 0x7f);
        assert_eq!(Receipt::decode(&encoded).unwrap(), r);
    }

    #[test]
    fn test_receipt_list_mixed_types() {
        let receipts = vec![
            receipt(ReceiptOutcome::Status(ReceiptStatus::SUCCESS), TxType::Legacy),
            receipt(ReceiptOutcome::Status(ReceiptStatus::FAILED), TxType::DynamicFee),
            receipt(ReceiptOutcome::Root([0x01; 32]), TxType::State),
        ];
        let decoded = decode_receipts(&encode_receipts(&receipts)).unwrap();
        assert_eq!(decoded, receipts);
    }

    #[test]
    fn test_receipt_arity() {
        let encoded = Item::list(vec![Item::uint(1), Item::uint(2), Item::uint(3)]).encode();
        assert_eq!(
            Receipt::decode(&encoded).unwrap_err().to_string(),
            "Incorrect element count to decode receipt, expected 4 but found 3"
        );
    }
}
