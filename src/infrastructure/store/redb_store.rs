//! Redirect store backed by a single redb file.
//!
//! Entries live in the `URLRedirects` table as `&str` path → `&str` URL.
//! The server only reads the store once at startup; the admin binary uses the
//! write operations.

use redb::{Database, DatabaseError, ReadableTable, TableDefinition, TableHandle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info};

use crate::domain::entities::RedirectRecord;
use crate::domain::redirect_map::validate_target;
use crate::domain::{RedirectMap, build_redirect_map};
use crate::error::{RedirectError, Result, StoreError};

/// Table holding all store redirects.
pub const REDIRECTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("URLRedirects");

/// Entry written when the table is created for the first time.
pub const SEED_PATH: &str = "/urlshort-bolt";
pub const SEED_URL: &str = "https://github.com/bcpoole/urlshort";

/// Delay between attempts while the file is locked by another process.
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to an open redirect store.
///
/// Holds the redb file lock until dropped.
pub struct RedirectStore {
    db: Database,
    path: PathBuf,
}

impl RedirectStore {
    /// Opens the store, creating the file if it does not exist.
    ///
    /// If another process holds the file, opening is retried every 100ms
    /// until `timeout` elapses.
    ///
    /// # Errors
    ///
    /// - [`StoreError::LockTimeout`] if the file stayed locked for `timeout`
    /// - [`StoreError::Open`] for any other open failure
    pub async fn open(
        path: impl AsRef<Path>,
        timeout: Duration,
    ) -> std::result::Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let attempts = usize::try_from(timeout.as_millis() / LOCK_RETRY_INTERVAL.as_millis())
            .unwrap_or(usize::MAX);
        let strategy = FixedInterval::new(LOCK_RETRY_INTERVAL).take(attempts);

        let opened = RetryIf::start(
            strategy,
            || {
                let path = path.clone();
                async move { Database::create(&path) }
            },
            |e: &DatabaseError| {
                let locked = matches!(e, DatabaseError::DatabaseAlreadyOpen);
                if locked {
                    debug!("Store is locked, retrying");
                }
                locked
            },
        )
        .await;

        match opened {
            Ok(db) => {
                debug!(path = %path.display(), "Store opened");
                Ok(Self { db, path })
            }
            Err(DatabaseError::DatabaseAlreadyOpen) => {
                Err(StoreError::LockTimeout { path, timeout })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the redirect table with a single example entry, unless the
    /// table already exists.
    ///
    /// An existing table is never touched, even when empty. Returns `true`
    /// if the seed was written.
    pub fn seed_if_absent(&self) -> std::result::Result<bool, StoreError> {
        let txn = self.db.begin_write()?;

        let exists = txn
            .list_tables()?
            .any(|table| table.name() == REDIRECTS_TABLE.name());
        if exists {
            txn.abort()?;
            return Ok(false);
        }

        {
            let mut table = txn.open_table(REDIRECTS_TABLE)?;
            table.insert(SEED_PATH, SEED_URL)?;
        }
        txn.commit()?;

        info!(path = SEED_PATH, url = SEED_URL, "Seeded new redirect store");
        Ok(true)
    }

    /// Reads every raw entry in key order.
    ///
    /// A store without the redirect table has no entries.
    pub fn entries(&self) -> std::result::Result<Vec<(String, String)>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(REDIRECTS_TABLE) {
            Ok(table) => table,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for entry in table.iter()? {
            let (path, url) = entry?;
            entries.push((path.value().to_string(), url.value().to_string()));
        }
        Ok(entries)
    }

    /// Reads the whole table into a validated [`RedirectMap`].
    ///
    /// # Errors
    ///
    /// Store failures, or a map builder error if an entry is invalid.
    pub fn snapshot(&self) -> Result<RedirectMap> {
        let entries = self.entries()?;
        build_redirect_map(
            entries
                .into_iter()
                .map(|(path, url)| RedirectRecord::new(path, url)),
        )
    }

    /// Inserts or replaces an entry after validating it.
    ///
    /// Returns the previous URL for `path`, if any.
    pub fn put(&self, path: &str, url: &str) -> Result<Option<String>> {
        if !path.starts_with('/') {
            return Err(RedirectError::InvalidPath {
                index: 0,
                path: path.to_string(),
            });
        }
        let target = validate_target(0, url.to_string())?;

        let txn = self.db.begin_write().map_err(StoreError::from)?;
        let previous = {
            let mut table = txn.open_table(REDIRECTS_TABLE).map_err(StoreError::from)?;
            table
                .insert(path, target.as_str())
                .map_err(StoreError::from)?
                .map(|old| old.value().to_string())
        };
        txn.commit().map_err(StoreError::from)?;

        Ok(previous)
    }

    /// Deletes an entry. Returns `true` if it existed.
    pub fn remove(&self, path: &str) -> std::result::Result<bool, StoreError> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(REDIRECTS_TABLE)?;
            table.remove(path)?.is_some()
        };
        txn.commit()?;

        Ok(removed)
    }
}

/// Opens the store, seeds it if new, and returns its full snapshot.
///
/// The store is closed before returning; requests are served from the
/// snapshot only.
pub async fn load_store(path: &Path, timeout: Duration) -> Result<RedirectMap> {
    let store = RedirectStore::open(path, timeout).await?;
    store.seed_if_absent()?;
    store.snapshot()
}
