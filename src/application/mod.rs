//! Application layer: loading sources at startup.
//!
//! - [`loader::load_sources`] - Builds every source's map in order
//! - [`loader::RedirectSources`] - The loaded maps, handed to [`crate::routes`]

pub mod loader;

pub use loader::{RedirectSources, load_sources};
