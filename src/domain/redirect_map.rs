//! Redirect map construction.
//!
//! Every source (static pairs, YAML, JSON, store snapshot) funnels its raw
//! records through [`build_redirect_map`], so all of them share one set of
//! validation rules.

use std::collections::HashMap;
use tracing::debug;
use url::{Position, Url};

use crate::domain::entities::{RedirectRecord, RedirectTarget};
use crate::error::{RedirectError, Result};

/// Base used to encode absolute-path targets; only the path part is kept.
const LOCAL_BASE: &str = "http://localhost/";

/// Immutable mapping from request path to redirect target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectMap {
    entries: HashMap<String, RedirectTarget>,
}

impl RedirectMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(path, url)` pairs, applying the same validation as
    /// file sources.
    ///
    /// # Errors
    ///
    /// See [`build_redirect_map`].
    pub fn from_pairs<I, P, U>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        build_redirect_map(
            pairs
                .into_iter()
                .map(|(path, url)| RedirectRecord::new(path, url)),
        )
    }

    /// Looks up the target for an exact request path.
    pub fn get(&self, path: &str) -> Option<&RedirectTarget> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`RedirectMap`] from a sequence of raw records.
///
/// # Rules
///
/// - `path` and `url` are both required and must be non-empty
/// - `path` must start with `/`
/// - `url` must be an absolute `http`/`https` URL or an absolute path, without
///   whitespace or control characters; non-ASCII characters are percent-encoded
/// - duplicate paths are allowed; the last one in input order wins
///
/// # Errors
///
/// The first invalid record aborts the build; no partial map is returned.
pub fn build_redirect_map<I>(records: I) -> Result<RedirectMap>
where
    I: IntoIterator<Item = RedirectRecord>,
{
    let mut entries = HashMap::new();

    for (index, record) in records.into_iter().enumerate() {
        let path = required(record.path, index, "path")?;
        let url = required(record.url, index, "url")?;

        if !path.starts_with('/') {
            return Err(RedirectError::InvalidPath { index, path });
        }

        let target = validate_target(index, url)?;

        if let Some(previous) = entries.insert(path, target) {
            debug!(index, previous = %previous, "Duplicate redirect path overridden");
        }
    }

    Ok(RedirectMap { entries })
}

fn required(value: Option<String>, index: usize, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RedirectError::MissingField { index, field }),
    }
}

/// Validates a redirect destination and wraps it as a [`RedirectTarget`].
///
/// A target made of visible ASCII is kept verbatim. Anything else is stored in
/// its percent-encoded form so it stays usable as a `Location` header.
pub(crate) fn validate_target(index: usize, url: String) -> Result<RedirectTarget> {
    let invalid = |reason: &str| RedirectError::InvalidUrl {
        index,
        url: url.clone(),
        reason: reason.to_string(),
    };

    if url.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(invalid("whitespace and control characters are not allowed"));
    }

    if url.starts_with("//") {
        return Err(invalid("protocol-relative URLs are not allowed"));
    }

    let parsed = if url.starts_with('/') {
        None
    } else {
        let parsed = Url::parse(&url).map_err(|e| invalid(&e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Some(parsed),
            _ => return Err(invalid("only http and https targets are allowed")),
        }
    };

    if url.is_ascii() {
        return Ok(RedirectTarget::new_unchecked(url));
    }

    let encoded = match parsed {
        Some(parsed) => parsed.as_str().to_string(),
        None => {
            let joined = Url::parse(LOCAL_BASE)
                .and_then(|base| base.join(&url))
                .map_err(|e| invalid(&e.to_string()))?;
            joined[Position::BeforePath..].to_string()
        }
    };
    Ok(RedirectTarget::new_unchecked(encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_basic() {
        let map = build_redirect_map(vec![
            RedirectRecord::new("/a", "https://a.example"),
            RedirectRecord::new("/b", "http://b.example/path?q=1"),
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("/a").unwrap().as_str(), "https://a.example");
        assert_eq!(map.get("/b").unwrap().as_str(), "http://b.example/path?q=1");
        assert!(map.get("/c").is_none());
    }

    #[test]
    fn test_duplicate_path_last_wins() {
        let map = build_redirect_map(vec![
            RedirectRecord::new("/a", "https://first.example"),
            RedirectRecord::new("/b", "https://b.example"),
            RedirectRecord::new("/a", "https://second.example"),
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("/a").unwrap().as_str(), "https://second.example");
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let record = RedirectRecord {
            path: None,
            url: Some("https://a.example".to_string()),
        };

        let err = build_redirect_map(vec![RedirectRecord::new("/ok", "/x"), record]).unwrap_err();

        assert!(matches!(
            err,
            RedirectError::MissingField {
                index: 1,
                field: "path"
            }
        ));
    }

    #[test]
    fn test_empty_url_is_rejected() {
        let err = build_redirect_map(vec![RedirectRecord::new("/a", "")]).unwrap_err();

        assert!(matches!(
            err,
            RedirectError::MissingField {
                index: 0,
                field: "url"
            }
        ));
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let err = build_redirect_map(vec![RedirectRecord::new("a", "https://a.example")])
            .unwrap_err();

        assert!(matches!(err, RedirectError::InvalidPath { index: 0, .. }));
    }

    #[test]
    fn test_target_validation() {
        assert!(validate_target(0, "https://example.com".to_string()).is_ok());
        assert!(validate_target(0, "/local/page".to_string()).is_ok());

        assert!(validate_target(0, "//evil.example".to_string()).is_err());
        assert!(validate_target(0, "javascript:alert(1)".to_string()).is_err());
        assert!(validate_target(0, "ftp://files.example".to_string()).is_err());
        assert!(validate_target(0, "not a url".to_string()).is_err());
        assert!(validate_target(0, "https://example.com/\r\nSet-Cookie".to_string()).is_err());
        assert!(validate_target(0, "https://example.com/a b".to_string()).is_err());
    }

    #[test]
    fn test_non_ascii_target_is_encoded() {
        let target = validate_target(0, "https://example.com/café?q=ü".to_string()).unwrap();
        assert_eq!(target.as_str(), "https://example.com/caf%C3%A9?q=%C3%BC");

        let target = validate_target(0, "/straße".to_string()).unwrap();
        assert_eq!(target.as_str(), "/stra%C3%9Fe");
    }

    #[test]
    fn test_target_kept_verbatim() {
        let target = validate_target(0, "https://Example.COM".to_string()).unwrap();

        assert_eq!(target.as_str(), "https://Example.COM");
    }

    #[test]
    fn test_from_pairs() {
        let map = RedirectMap::from_pairs([("/a", "https://a.example")]).unwrap();

        assert!(map.contains("/a"));
        assert!(!map.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let map = build_redirect_map(Vec::new()).unwrap();

        assert!(map.is_empty());
    }
}
