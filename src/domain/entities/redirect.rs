//! Redirect entities: raw records as read from a source and validated targets.

use serde::Deserialize;
use std::fmt;

/// A single `{path, url}` record as it appears in a YAML or JSON source.
///
/// Both fields are optional at the parsing stage so that a record missing one
/// of them is reported by the map builder with its position, instead of
/// surfacing as an opaque deserialization error. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RedirectRecord {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RedirectRecord {
    /// Creates a complete record.
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            url: Some(url.into()),
        }
    }
}

/// A redirect destination that passed validation.
///
/// Constructed only by [`crate::domain::redirect_map::validate_target`], so
/// every value is usable as a `Location` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RedirectTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
