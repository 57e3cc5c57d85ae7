//! Route identity.
//!
//! `RouteId` identifies a node inside one decorated tree and doubles as its
//! arena index. `RouteKey` identifies a rendered route instance by content,
//! so it survives re-decoration of the same configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node within a single decoration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteId(u32);

impl RouteId {
    /// The synthetic sentinel that parents the top-level routes.
    pub const SENTINEL: RouteId = RouteId(0);

    /// Create an id from a raw counter value.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether this is the sentinel id.
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing ids for one decoration pass.
///
/// The first id handed out is always [`RouteId::SENTINEL`].
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at the sentinel.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocate the next id.
    pub fn allocate(&mut self) -> RouteId {
        let id = RouteId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids allocated so far.
    pub fn allocated(&self) -> usize {
        self.next as usize
    }
}

/// Render key for a route instance.
///
/// Built from the route's normalized base path and its configuration, not
/// from its [`RouteId`], so two decorations of the same configuration
/// produce the same keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteKey(String);

impl RouteKey {
    /// Create a key from a raw string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Compose a key from route content.
    pub fn compose(
        base_path: &str,
        path: Option<&str>,
        props: &str,
        strict: bool,
        sensitive: bool,
        has_children: bool,
    ) -> Self {
        Self(format!(
            "{}|{}|{}|{}|{}|{}",
            base_path,
            path.unwrap_or_default(),
            props,
            strict,
            sensitive,
            has_children
        ))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RouteKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
