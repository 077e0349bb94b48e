//! YAML and JSON file sources.
//!
//! Both formats carry a sequence of `{path, url}` records:
//!
//! ```yaml
//! - path: /foo
//!   url: https://example.com/foo
//! ```
//!
//! ```json
//! [{"path": "/foo", "url": "https://example.com/foo"}]
//! ```

use std::fs;
use std::path::Path;

use crate::domain::entities::RedirectRecord;
use crate::domain::{RedirectMap, build_redirect_map};
use crate::error::{RedirectError, Result};

/// Structured-data format of a file source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// Guesses the format from a file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parses raw file content in this format.
    pub fn parse(&self, data: &[u8]) -> Result<RedirectMap> {
        match self {
            Self::Yaml => parse_yaml(data),
            Self::Json => parse_json(data),
        }
    }
}

/// Parses a YAML sequence of records into a redirect map.
///
/// Blank input yields an empty map.
///
/// # Errors
///
/// [`RedirectError::Yaml`] on invalid syntax or shape, or any map builder error.
pub fn parse_yaml(data: &[u8]) -> Result<RedirectMap> {
    if is_blank(data) {
        return Ok(RedirectMap::new());
    }
    let records: Vec<RedirectRecord> = serde_yaml::from_slice(data)?;
    build_redirect_map(records)
}

/// Parses a JSON array of records into a redirect map.
///
/// Unlike YAML, blank input is not a document; an empty source is `[]`.
///
/// # Errors
///
/// [`RedirectError::Json`] on invalid syntax or shape, or any map builder error.
pub fn parse_json(data: &[u8]) -> Result<RedirectMap> {
    let records: Vec<RedirectRecord> = serde_json::from_slice(data)?;
    build_redirect_map(records)
}

/// Reads and parses a file source.
///
/// # Errors
///
/// [`RedirectError::Io`] if the file cannot be read, otherwise any parse error.
pub fn load_file(path: &Path, format: SourceFormat) -> Result<RedirectMap> {
    let data = fs::read(path).map_err(|source| RedirectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&data)
}

/// Like [`load_file`], with the format taken from the file extension.
pub fn load_file_detect(path: &Path) -> Result<RedirectMap> {
    let format = SourceFormat::from_path(path).ok_or_else(|| RedirectError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    load_file(path, format)
}

fn is_blank(data: &[u8]) -> bool {
    data.iter().all(u8::is_ascii_whitespace)
}
