//! Core domain entities.
//!
//! - [`RedirectRecord`] - A raw `{path, url}` record read from a source
//! - [`RedirectTarget`] - A validated redirect destination

pub mod redirect;

pub use redirect::{RedirectRecord, RedirectTarget};
