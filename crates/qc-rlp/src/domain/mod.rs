//! Domain layer: element tree, encoder, parser and parser pool.

mod error;
mod item;
mod parser;
mod pool;

pub use error::*;
pub use item::*;
pub use parser::*;
pub use pool::*;

/// Highest byte value that encodes itself with no prefix.
pub const SINGLE_BYTE_MAX: u8 = 0x7f;

/// Prefix base for byte strings of length 0..=55.
pub const STRING_SHORT: u8 = 0x80;

/// Prefix base for byte strings longer than 55 bytes.
pub const STRING_LONG: u8 = 0xb7;

/// Prefix base for lists whose payload is 0..=55 bytes.
pub const LIST_SHORT: u8 = 0xc0;

/// Prefix base for lists whose payload is longer than 55 bytes.
pub const LIST_LONG: u8 = 0xf7;

/// Longest payload that still uses the single-byte prefix form.
pub const MAX_SHORT_LEN: usize = 55;

/// Deepest list nesting the parser accepts.
pub const MAX_DEPTH: usize = 128;
