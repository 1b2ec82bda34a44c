//! # Element Tree Parser
//!
//! Parses canonical bytes into a flat arena of nodes that borrow the input.
//! A [`Value`] is a cheap, copyable view into that arena.
//!
//! ## Rejections
//!
//! - truncated input or a declared length past the end of the buffer
//! - bytes left over after the root element
//! - non-minimal prefixes (long form for a short payload, leading zero in
//!   the length, `0x81` wrapping a byte below `0x80`)
//! - nesting deeper than [`MAX_DEPTH`]

use shared_types::{Address, Bloom, Hash, U256, BLOOM_LENGTH};

use super::{
    RlpError, RlpResult, LIST_LONG, LIST_SHORT, MAX_DEPTH, MAX_SHORT_LEN, SINGLE_BYTE_MAX,
    STRING_LONG, STRING_SHORT,
};

/// Syntactic kind of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bytes,
    List,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    kind: Kind,
    /// Payload range inside the input.
    start: usize,
    end: usize,
    /// Children are stored contiguously in the arena.
    children_start: usize,
    children_len: usize,
}

/// Reusable parser. Holds the node arena between parses so pooled instances
/// do not reallocate for every message.
#[derive(Debug, Default)]
pub struct Parser {
    nodes: Vec<Node>,
}

/// Arena capacity kept across parses; larger arenas are shrunk on reset.
const RETAINED_NODES: usize = 4096;

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `input` as exactly one root element.
    pub fn parse<'a>(&'a mut self, input: &'a [u8]) -> RlpResult<Value<'a>> {
        self.nodes.clear();

        let (root, next) = read_header(input, 0, input.len())?;
        if next != input.len() {
            return Err(RlpError::TrailingBytes {
                remaining: input.len() - next,
            });
        }
        self.nodes.push(root);

        if root.kind == Kind::List {
            let (start, len) = self.parse_children(input, root.start, root.end, 1)?;
            self.nodes[0].children_start = start;
            self.nodes[0].children_len = len;
        }

        Ok(Value {
            input,
            nodes: &self.nodes,
            index: 0,
        })
    }

    /// Drop parsed state so the parser can go back to a pool.
    pub fn reset(&mut self) {
        self.nodes.clear();
        if self.nodes.capacity() > RETAINED_NODES {
            self.nodes.shrink_to(RETAINED_NODES);
        }
    }

    /// Two passes per list: read the immediate child headers so siblings sit
    /// next to each other in the arena, then descend into child lists.
    fn parse_children(
        &mut self,
        input: &[u8],
        start: usize,
        end: usize,
        depth: usize,
    ) -> RlpResult<(usize, usize)> {
        if depth > MAX_DEPTH {
            return Err(RlpError::TooDeep(MAX_DEPTH));
        }

        let first = self.nodes.len();
        let mut pos = start;
        while pos < end {
            let (node, next) = read_header(input, pos, end)?;
            self.nodes.push(node);
            pos = next;
        }
        let count = self.nodes.len() - first;

        for i in first..first + count {
            let node = self.nodes[i];
            if node.kind == Kind::List && node.end > node.start {
                let (c_start, c_len) = self.parse_children(input, node.start, node.end, depth + 1)?;
                self.nodes[i].children_start = c_start;
                self.nodes[i].children_len = c_len;
            }
        }

        Ok((first, count))
    }
}

/// Decode the prefix at `pos`; returns the node and the offset just past it.
fn read_header(input: &[u8], pos: usize, limit: usize) -> RlpResult<(Node, usize)> {
    if pos >= limit {
        return Err(RlpError::UnexpectedEof {
            needed: 1,
            available: 0,
        });
    }

    let prefix = input[pos];
    let (kind, start, len) = match prefix {
        0x00..=SINGLE_BYTE_MAX => (Kind::Bytes, pos, 1),
        STRING_SHORT..=STRING_LONG => {
            let len = (prefix - STRING_SHORT) as usize;
            if len == 1 && pos + 1 < limit && input[pos + 1] <= SINGLE_BYTE_MAX {
                return Err(RlpError::NonCanonicalSingleByte {
                    byte: input[pos + 1],
                    offset: pos,
                });
            }
            (Kind::Bytes, pos + 1, len)
        }
        0xb8..=0xbf => {
            let len_of_len = (prefix - STRING_LONG) as usize;
            let len = read_long_length(input, pos, len_of_len, limit)?;
            (Kind::Bytes, pos + 1 + len_of_len, len)
        }
        LIST_SHORT..=LIST_LONG => (Kind::List, pos + 1, (prefix - LIST_SHORT) as usize),
        0xf8..=0xff => {
            let len_of_len = (prefix - LIST_LONG) as usize;
            let len = read_long_length(input, pos, len_of_len, limit)?;
            (Kind::List, pos + 1 + len_of_len, len)
        }
    };

    let end = start
        .checked_add(len)
        .ok_or(RlpError::LengthOverflow(len_of(len)))?;
    if end > limit {
        return Err(RlpError::UnexpectedEof {
            needed: len,
            available: limit.saturating_sub(start),
        });
    }

    Ok((
        Node {
            kind,
            start,
            end,
            children_start: 0,
            children_len: 0,
        },
        end,
    ))
}

fn read_long_length(input: &[u8], pos: usize, len_of_len: usize, limit: usize) -> RlpResult<usize> {
    let first = pos + 1;
    if first + len_of_len > limit {
        return Err(RlpError::UnexpectedEof {
            needed: len_of_len,
            available: limit - first,
        });
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(RlpError::LengthOverflow(len_of_len));
    }

    let len_bytes = &input[first..first + len_of_len];
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonicalSize { offset: pos });
    }

    let len = len_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize);
    if len <= MAX_SHORT_LEN {
        return Err(RlpError::NonCanonicalSize { offset: pos });
    }
    Ok(len)
}

fn len_of(len: usize) -> usize {
    std::mem::size_of::<usize>() - (len.leading_zeros() as usize / 8)
}

/// A parsed element. Borrows both the input bytes and the parser arena.
#[derive(Clone, Copy)]
pub struct Value<'a> {
    input: &'a [u8],
    nodes: &'a [Node],
    index: usize,
}

impl<'a> Value<'a> {
    fn node(&self) -> &'a Node {
        &self.nodes[self.index]
    }

    pub fn kind(&self) -> Kind {
        self.node().kind
    }

    pub fn is_list(&self) -> bool {
        self.kind() == Kind::List
    }

    pub fn is_bytes(&self) -> bool {
        self.kind() == Kind::Bytes
    }

    /// Payload of an atom.
    pub fn bytes(&self) -> RlpResult<&'a [u8]> {
        let node = self.node();
        match node.kind {
            Kind::Bytes => Ok(&self.input[node.start..node.end]),
            Kind::List => Err(RlpError::ExpectedBytes),
        }
    }

    /// Children of a list.
    pub fn elems(&self) -> RlpResult<Vec<Value<'a>>> {
        let node = self.node();
        if node.kind != Kind::List {
            return Err(RlpError::ExpectedList);
        }
        Ok((node.children_start..node.children_start + node.children_len)
            .map(|index| Value {
                input: self.input,
                nodes: self.nodes,
                index,
            })
            .collect())
    }

    /// Number of children; zero for atoms.
    pub fn elem_count(&self) -> usize {
        self.node().children_len
    }

    /// Big-endian u64 with no leading zero byte.
    pub fn get_uint64(&self) -> RlpResult<u64> {
        let data = self.uint_bytes(8)?;
        Ok(data.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
    }

    /// Big-endian U256 with no leading zero byte.
    pub fn get_u256(&self) -> RlpResult<U256> {
        let data = self.uint_bytes(32)?;
        Ok(U256::from_big_endian(data))
    }

    fn uint_bytes(&self, max: usize) -> RlpResult<&'a [u8]> {
        let data = self.bytes()?;
        if data.len() > max {
            return Err(RlpError::IntegerTooLarge {
                max,
                actual: data.len(),
            });
        }
        if data.first() == Some(&0) {
            return Err(RlpError::LeadingZero);
        }
        Ok(data)
    }

    /// Atom of exactly `N` bytes.
    pub fn get_fixed<const N: usize>(&self) -> RlpResult<[u8; N]> {
        let data = self.get_bytes_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(data);
        Ok(out)
    }

    pub fn get_hash(&self) -> RlpResult<Hash> {
        self.get_fixed::<32>()
    }

    pub fn get_address(&self) -> RlpResult<Address> {
        self.get_fixed::<20>()
    }

    pub fn get_bloom(&self) -> RlpResult<Bloom> {
        Ok(Bloom(self.get_fixed::<BLOOM_LENGTH>()?))
    }

    /// Atom whose length must be exactly `expected`.
    pub fn get_bytes_exact(&self, expected: usize) -> RlpResult<&'a [u8]> {
        let data = self.bytes()?;
        if data.len() != expected {
            return Err(RlpError::WrongLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    /// Owned copy of an atom's payload.
    pub fn get_bytes(&self) -> RlpResult<Vec<u8>> {
        Ok(self.bytes()?.to_vec())
    }

    pub fn get_string(&self) -> RlpResult<String> {
        String::from_utf8(self.get_bytes()?).map_err(|_| RlpError::InvalidUtf8)
    }

    /// `0x01` is true, the empty atom is false; anything else is rejected.
    pub fn get_bool(&self) -> RlpResult<bool> {
        match self.bytes()? {
            [] => Ok(false),
            [1] => Ok(true),
            _ => Err(RlpError::InvalidBool),
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.node();
        f.debug_struct("Value")
            .field("kind", &node.kind)
            .field("payload_len", &(node.end - node.start))
            .field("elems", &node.children_len)
            .finish()
    }
}
