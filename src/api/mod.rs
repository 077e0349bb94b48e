//! HTTP layer.
//!
//! # Modules
//!
//! - [`handlers`] - The greeting handler terminating the chain
//! - [`middleware`] - The redirect lookup layer and request tracing

pub mod handlers;
pub mod middleware;
