//! HTTP middleware: the redirect lookup layer and request tracing.

pub mod redirect;
pub mod tracing;

pub use redirect::{RedirectLayer, RedirectService};
