//! Fork registry entities

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Name of a protocol fork.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ForkName(Cow<'static, str>);

impl ForkName {
    /// Fork every registry starts with, active from genesis.
    pub const BASE: ForkName = ForkName(Cow::Borrowed("basev1"));
    pub const LONDON: ForkName = ForkName(Cow::Borrowed("london"));
    pub const NIKARAGVA: ForkName = ForkName(Cow::Borrowed("nikaragva"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ForkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ForkName {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// Name of a fork-versioned capability, e.g. the header extra-data codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HandlerName(Cow<'static, str>);

impl HandlerName {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for HandlerName {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// A named fork and the first block it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fork {
    pub name: ForkName,
    pub from_block: u64,
}

impl Fork {
    pub fn new(name: ForkName, from_block: u64) -> Self {
        Self { name, from_block }
    }

    pub fn is_active_at(&self, block: u64) -> bool {
        self.from_block <= block
    }
}

/// A handler and the activation height of the fork it was registered on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkHandler<H> {
    pub from_block: u64,
    pub handler: H,
}
