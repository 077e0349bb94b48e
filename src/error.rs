//! Error types raised while building redirect sources.
//!
//! Every error here is a startup error: once the handler chain is assembled
//! there is no runtime failure path, so nothing in this module maps to an
//! HTTP response.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading a source and building its redirect map.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record #{index} is missing the `{field}` field")]
    MissingField { index: usize, field: &'static str },

    #[error("record #{index}: path '{path}' must start with '/'")]
    InvalidPath { index: usize, path: String },

    #[error("record #{index}: invalid redirect target '{url}': {reason}")]
    InvalidUrl {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("unsupported source file extension: {}", .path.display())]
    UnknownFormat { path: PathBuf },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by the embedded key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("store {} is locked by another process (gave up after {timeout:?})", .path.display())]
    LockTimeout { path: PathBuf, timeout: Duration },

    #[error("store transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("store table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("store storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("store commit failed: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type Result<T> = std::result::Result<T, RedirectError>;
