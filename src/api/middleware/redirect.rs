//! Lookup handler: redirect on hit, delegate to the fallback on miss.
//!
//! One generic service type serves every source. Sources differ only in how
//! their [`RedirectMap`] was built.

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::future::ready;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, error};

use crate::domain::{RedirectMap, RedirectSource};

/// Wraps a fallback service with a redirect lookup for one source.
#[derive(Debug, Clone)]
pub struct RedirectLayer {
    source: RedirectSource,
    map: Arc<RedirectMap>,
}

impl RedirectLayer {
    pub fn new(source: RedirectSource, map: RedirectMap) -> Self {
        Self {
            source,
            map: Arc::new(map),
        }
    }
}

impl<S> Layer<S> for RedirectLayer {
    type Service = RedirectService<S>;

    fn layer(&self, fallback: S) -> Self::Service {
        RedirectService {
            source: self.source,
            map: self.map.clone(),
            fallback,
        }
    }
}

/// A lookup handler: one redirect map plus the next handler in the chain.
///
/// # Behavior
///
/// - request path found in the map: `302 Found` with `Location` set to the
///   mapped target, for any method
/// - otherwise: the request is passed to `fallback` and its response is
///   returned unchanged
#[derive(Debug, Clone)]
pub struct RedirectService<S> {
    source: RedirectSource,
    map: Arc<RedirectMap>,
    fallback: S,
}

impl<S> RedirectService<S> {
    pub fn new(source: RedirectSource, map: Arc<RedirectMap>, fallback: S) -> Self {
        Self {
            source,
            map,
            fallback,
        }
    }

    pub fn source(&self) -> RedirectSource {
        self.source
    }
}

impl<S> Service<Request<Body>> for RedirectService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        match self.map.get(req.uri().path()) {
            Some(target) => {
                debug!(
                    source = %self.source,
                    path = req.uri().path(),
                    location = %target,
                    "Redirect hit"
                );
                Box::pin(ready(Ok(found(target.as_str()))))
            }
            None => Box::pin(self.fallback.call(req)),
        }
    }
}

/// Builds a `302 Found` response pointing at `target`.
fn found(target: &str) -> Response {
    match HeaderValue::from_str(target) {
        Ok(location) => {
            let mut response = StatusCode::FOUND.into_response();
            response.headers_mut().insert(header::LOCATION, location);
            response
        }
        Err(e) => {
            error!(location = target, error = %e, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use tower::ServiceExt;

    fn fallback() -> Router {
        Router::new().fallback(|| async { "fallback" })
    }

    fn service(pairs: &[(&str, &str)]) -> RedirectService<Router> {
        let map = RedirectMap::from_pairs(pairs.iter().copied()).unwrap();
        RedirectLayer::new(RedirectSource::Static, map).layer(fallback())
    }

    #[tokio::test]
    async fn test_hit_redirects_with_found() {
        let svc = service(&[("/a", "https://a.example")]);

        let response = svc
            .oneshot(Request::get("/a").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://a.example"
        );
    }

    #[tokio::test]
    async fn test_hit_ignores_method() {
        let svc = service(&[("/a", "https://a.example")]);

        let response = svc
            .oneshot(Request::post("/a").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_miss_delegates_to_fallback() {
        let svc = service(&[("/a", "https://a.example")]);

        let response = svc
            .oneshot(Request::get("/b").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_query_string_is_not_part_of_path() {
        let svc = service(&[("/a", "https://a.example")]);

        let response = svc
            .oneshot(Request::get("/a?ref=home").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn test_trailing_slash_is_distinct() {
        let svc = service(&[("/a", "https://a.example")]);

        let response = svc
            .oneshot(Request::get("/a/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_found_rejects_invalid_header() {
        let response = found("https://a.example/\n");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_source_is_kept() {
        let svc = RedirectService::new(RedirectSource::Yaml, Arc::new(RedirectMap::new()), ());
        assert_eq!(svc.source(), RedirectSource::Yaml);
    }
}
