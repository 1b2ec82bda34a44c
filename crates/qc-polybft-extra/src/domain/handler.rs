//! # Extra Handlers
//!
//! One variant per extra-data layout. Each encodes the shared base fields
//! and then its own fork fields as strings.
//!
//! | Variant | Fork | Fork fields |
//! |---------|------|-------------|
//! | `Base` | basev1 | 0 |
//! | `London` | london | 1 |
//! | `Nikaragva` | nikaragva | 2 |

use std::fmt;

use qc_chain_codec::{FieldContext, Header};
use qc_fork_manager::{ForkName, HandlerName};
use qc_rlp::{Item, Value};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Extra, ExtraError, ExtraResult, BASE_FIELDS};

/// Extra-data codec variant, stored in the fork registry per activation
/// height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraHandler {
    Base,
    London,
    Nikaragva,
}

impl ExtraHandler {
    /// Registry capability the handlers are registered under.
    pub const CAPABILITY: HandlerName = HandlerName::from_static("extra");

    pub const ALL: [ExtraHandler; 3] = [
        ExtraHandler::Base,
        ExtraHandler::London,
        ExtraHandler::Nikaragva,
    ];

    /// Fork this variant is registered on.
    pub fn fork(self) -> ForkName {
        match self {
            ExtraHandler::Base => ForkName::BASE,
            ExtraHandler::London => ForkName::LONDON,
            ExtraHandler::Nikaragva => ForkName::NIKARAGVA,
        }
    }

    /// Fork fields written after the base fields.
    pub fn additional_fields(self) -> usize {
        match self {
            ExtraHandler::Base => 0,
            ExtraHandler::London => 1,
            ExtraHandler::Nikaragva => 2,
        }
    }

    /// Total element count of an encoded extra.
    pub fn element_count(self) -> usize {
        BASE_FIELDS + self.additional_fields()
    }

    /// Element-tree form. Missing fork fields are written as empty strings
    /// and surplus ones are dropped.
    pub fn rlp_item(self, extra: &Extra) -> Item {
        trace!(handler = %self, block = extra.block_number, "[qc-polybft-extra] encoding extra");

        let mut items = extra.base_items();
        items.extend((0..self.additional_fields()).map(|i| {
            Item::string(extra.fork_fields.get(i).map(String::as_str).unwrap_or_default())
        }));
        Item::list(items)
    }

    /// Decode an extra encoded by this variant.
    pub fn from_value(self, value: &Value<'_>, block_number: u64) -> ExtraResult<Extra> {
        trace!(handler = %self, block = block_number, "[qc-polybft-extra] decoding extra");

        let elems = value.elems()?;
        let expected = self.element_count();
        if elems.len() != expected {
            return Err(ExtraError::ElementCount {
                handler: self,
                expected,
                actual: elems.len(),
            });
        }

        let mut extra = Extra::from_base_elems(&elems[..BASE_FIELDS], block_number)?;
        extra.fork_fields = elems[BASE_FIELDS..]
            .iter()
            .map(|e| e.get_string().field("extra", "fork_fields"))
            .collect::<Result<_, _>>()?;

        Ok(extra)
    }

    /// Checks this variant places on its fork fields.
    pub fn validate_additional(self, extra: &Extra, header: &Header) -> ExtraResult<()> {
        for index in 0..self.additional_fields() {
            let empty = extra
                .fork_fields
                .get(index)
                .map_or(true, |field| field.is_empty());
            if empty {
                return Err(ExtraError::EmptyForkField {
                    index,
                    block: header.number,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ExtraHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fork(), f)
    }
}
