//! Infrastructure layer: the concrete redirect sources.
//!
//! # Modules
//!
//! - [`files`] - YAML and JSON file sources
//! - [`store`] - redb key-value store source

pub mod files;
pub mod store;
