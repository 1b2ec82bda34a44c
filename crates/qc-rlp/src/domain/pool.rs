//! # Parser Pool
//!
//! Decoding borrows a [`Parser`] from a pool and returns it on drop, so the
//! parser goes back on every exit path (success, error or unwind).
//!
//! ```rust,ignore
//! let mut parser = DEFAULT_PARSER_POOL.get();
//! let value = parser.parse(input)?;
//! // parser returns to the pool when `parser` goes out of scope
//! ```

use std::ops::{Deref, DerefMut};

use lazy_static::lazy_static;
use parking_lot::Mutex;

use super::{Parser, RlpError, Value};

/// Idle parsers kept by a pool; extra parsers are dropped on release.
pub const MAX_POOLED_PARSERS: usize = 64;

lazy_static! {
    /// Process-wide pool used by [`decode_with`].
    pub static ref DEFAULT_PARSER_POOL: ParserPool = ParserPool::new();
}

/// Thread-safe pool of reusable parsers.
#[derive(Debug, Default)]
pub struct ParserPool {
    parsers: Mutex<Vec<Parser>>,
}

impl ParserPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a parser, creating one if the pool is empty.
    pub fn get(&self) -> PooledParser<'_> {
        let parser = self.parsers.lock().pop().unwrap_or_default();
        PooledParser { pool: self, parser }
    }

    /// Number of idle parsers.
    pub fn idle(&self) -> usize {
        self.parsers.lock().len()
    }

    fn put(&self, mut parser: Parser) {
        parser.reset();
        let mut parsers = self.parsers.lock();
        if parsers.len() < MAX_POOLED_PARSERS {
            parsers.push(parser);
        }
    }
}

/// A parser on loan from a [`ParserPool`].
pub struct PooledParser<'p> {
    pool: &'p ParserPool,
    parser: Parser,
}

impl Deref for PooledParser<'_> {
    type Target = Parser;

    fn deref(&self) -> &Parser {
        &self.parser
    }
}

impl DerefMut for PooledParser<'_> {
    fn deref_mut(&mut self) -> &mut Parser {
        &mut self.parser
    }
}

impl Drop for PooledParser<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.parser));
    }
}

/// Parse `input` with a pooled parser and hand the root value to `f`.
///
/// The parser is released before this returns, whatever `f` returns.
pub fn decode_with<T, E, F>(input: &[u8], f: F) -> Result<T, E>
where
    F: FnOnce(&Value<'_>) -> Result<T, E>,
    E: From<RlpError>,
{
    decode_with_pool(&DEFAULT_PARSER_POOL, input, f)
}

/// [`decode_with`] against an explicit pool.
pub fn decode_with_pool<T, E, F>(pool: &ParserPool, input: &[u8], f: F) -> Result<T, E>
where
    F: FnOnce(&Value<'_>) -> Result<T, E>,
    E: From<RlpError>,
{
    let mut parser = pool.get();
    let value = parser.parse(input)?;
    f(&value)
}
