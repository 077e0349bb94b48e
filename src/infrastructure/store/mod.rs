//! Embedded key-value store for redirects.
//!
//! - [`RedirectStore`] - redb-backed store handle
//! - [`load_store`] - open, seed and snapshot in one step, used at startup

mod redb_store;

pub use redb_store::{REDIRECTS_TABLE, RedirectStore, SEED_PATH, SEED_URL, load_store};
