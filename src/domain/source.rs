//! Identifiers for the lookup sources feeding the handler chain.

use std::fmt;

/// A lookup source, listed in chain priority order (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectSource {
    /// Built-in map compiled into the configuration.
    Static,
    /// Embedded redb key-value store.
    Store,
    /// YAML file.
    Yaml,
    /// JSON file.
    Json,
}

impl RedirectSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Store => "store",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for RedirectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
