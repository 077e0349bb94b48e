//! # URL Redirect
//!
//! A configuration-driven URL redirect service built with Axum.
//!
//! Request paths are looked up in a chain of sources, highest priority
//! first; the first source that knows the path answers with `302 Found`.
//! A path unknown to every source reaches the default router, which answers
//! `200 Hello, world!`.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Records, validated redirect maps, source identifiers
//! - **Application Layer** ([`application`]) - Sequential startup loading of all sources
//! - **Infrastructure Layer** ([`infrastructure`]) - YAML/JSON files and the redb store
//! - **API Layer** ([`api`]) - The redirect lookup layer and the greeting handler
//! - **Routes** ([`routes`]) - Chain assembly in priority order
//!
//! ## Sources
//!
//! | Priority | Source | Origin |
//! |----------|--------|--------|
//! | 1 | static | [`config::BUILTIN_REDIRECTS`] |
//! | 2 | store | redb file, table `URLRedirects` |
//! | 3 | yaml | `--yamlfile` |
//! | 4 | json | `--jsonfile` |
//!
//! Every map is built once at startup and never changes. Any startup error
//! (unreadable file, malformed data, invalid record, locked store) aborts the
//! process.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -- --yamlfile urls.yaml --jsonfile urls.json --boltfile redirects.redb
//! ```
//!
//! ## Configuration
//!
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{RedirectError, StoreError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::{RedirectSources, load_sources};
    pub use crate::config::Config;
    pub use crate::domain::{RedirectMap, RedirectSource, build_redirect_map};
    pub use crate::error::{RedirectError, StoreError};
    pub use crate::routes::app_router;
}
