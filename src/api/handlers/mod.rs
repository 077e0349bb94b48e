//! HTTP request handlers.

pub mod greeting;

pub use greeting::{GREETING, default_router, greeting_handler};
