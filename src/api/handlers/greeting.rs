//! Terminal handler of the redirect chain.

use axum::Router;

/// Body returned when no source has a redirect for the requested path.
pub const GREETING: &str = "Hello, world!\n";

/// Answers any request with `200 OK` and [`GREETING`].
pub async fn greeting_handler() -> &'static str {
    GREETING
}

/// Default router: every method and path falls through to the greeting.
pub fn default_router() -> Router {
    Router::new().fallback(greeting_handler)
}
