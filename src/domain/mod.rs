//! Domain layer: redirect records, validated maps, and source identifiers.
//!
//! Nothing in here knows about HTTP or storage. Sources are loaded by
//! [`crate::infrastructure`] and turned into maps by [`redirect_map`].
//!
//! - [`entities`] - Raw records and validated targets
//! - [`redirect_map`] - The map builder shared by every source
//! - [`source`] - Source identifiers in chain priority order

pub mod entities;
pub mod redirect_map;
pub mod source;

pub use redirect_map::{RedirectMap, build_redirect_map};
pub use source::RedirectSource;
