//! Navigation locations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::{resolve_target, ROOT_PATH};

/// A navigation location: pathname plus optional query and fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Absolute pathname (e.g., "/products/42").
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
}

impl Location {
    /// Create a location with only a pathname.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Parse `pathname?search#hash`.
    pub fn parse(raw: &str) -> Self {
        let (rest, hash) = match raw.find('#') {
            Some(i) => (&raw[..i], &raw[i..]),
            None => (raw, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        let pathname = if pathname.is_empty() { ROOT_PATH } else { pathname };

        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
        }
    }

    /// Set the query string.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Set the fragment.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Resolve the pathname against `base`, keeping query and fragment.
    pub fn resolved_against(&self, base: &str) -> Self {
        Self {
            pathname: resolve_target(base, &self.pathname),
            search: self.search.clone(),
            hash: self.hash.clone(),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(ROOT_PATH)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl From<&str> for Location {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Location {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}
