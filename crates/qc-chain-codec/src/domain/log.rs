//! Event logs emitted during execution.

use qc_rlp::{Encodable, Item, Value};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash};

use super::{expect_elems, CodecResult, FieldContext};

pub const LOG_FIELDS: usize = 3;

const OBJECT: &str = "log";

/// A single log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<Hash>,
    pub data: Vec<u8>,
}

impl Log {
    pub fn from_value(value: &Value<'_>) -> CodecResult<Self> {
        let elems = expect_elems(value, OBJECT, LOG_FIELDS)?;

        let topics = elems[1]
            .elems()
            .field(OBJECT, "topics")?
            .iter()
            .map(|topic| topic.get_hash().field(OBJECT, "topics"))
            .collect::<CodecResult<_>>()?;

        Ok(Self {
            address: elems[0].get_address().field(OBJECT, "address")?,
            topics,
            data: elems[2].get_bytes().field(OBJECT, "data")?,
        })
    }
}

impl Encodable for Log {
    fn rlp_item(&self) -> Item {
        Item::list(vec![
            Item::bytes(self.address),
            Item::list(self.topics.iter().map(|t| Item::bytes(*t)).collect()),
            Item::bytes(self.data.clone()),
        ])
    }
}
