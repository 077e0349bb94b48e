//! Handler chain assembly.
//!
//! # Chain Order
//!
//! Highest priority first:
//!
//! 1. Static map (compiled-in configuration)
//! 2. redb key-value store
//! 3. YAML file
//! 4. JSON file
//! 5. Default router (`200 Hello, world!`)
//!
//! A path present in several sources is answered by the first one. There is
//! no merging; swapping two layers swaps which source wins.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging around the whole chain

use axum::Router;
use tower::ServiceBuilder;

use crate::api::handlers::default_router;
use crate::api::middleware::{RedirectLayer, tracing};
use crate::application::RedirectSources;
use crate::domain::RedirectSource;

/// Constructs the application router from the loaded sources.
pub fn app_router(sources: RedirectSources) -> Router {
    let RedirectSources {
        static_map,
        store,
        yaml,
        json,
    } = sources;

    let chain = ServiceBuilder::new()
        .layer(RedirectLayer::new(RedirectSource::Static, static_map))
        .layer(RedirectLayer::new(RedirectSource::Store, store))
        .layer(RedirectLayer::new(RedirectSource::Yaml, yaml))
        .layer(RedirectLayer::new(RedirectSource::Json, json))
        .service(default_router());

    Router::new()
        .fallback_service(chain)
        .layer(tracing::layer())
}
