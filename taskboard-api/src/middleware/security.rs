/// Response security headers
///
/// A small tower layer stamping the OWASP baseline headers onto every
/// response: content-type sniffing off, framing denied, a restrictive CSP,
/// and a trimmed Permissions-Policy. HSTS is added only in production,
/// where the service is actually behind TLS.

use axum::http::{HeaderName, HeaderValue};
use axum::{extract::Request, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

const BASELINE_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    (
        "permissions-policy",
        "geolocation=(), microphone=(), camera=(), payment=(), usb=()",
    ),
    (
        "content-security-policy",
        "default-src 'self'; frame-ancestors 'none'",
    ),
];

const HSTS: (&str, &str) = (
    "strict-transport-security",
    "max-age=31536000; includeSubDomains; preload",
);

/// Layer applying the security headers to every response
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    production: bool,
}

impl SecurityHeadersLayer {
    /// `production = true` additionally emits HSTS
    pub fn new(production: bool) -> Self {
        Self { production }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeaders {
            inner,
            production: self.production,
        }
    }
}

/// Service produced by [`SecurityHeadersLayer`]
#[derive(Clone)]
pub struct SecurityHeaders<S> {
    inner: S,
    production: bool,
}

impl<S> Service<Request> for SecurityHeaders<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let production = self.production;
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;
            let headers = response.headers_mut();

            for &(name, value) in BASELINE_HEADERS {
                headers.insert(
                    HeaderName::from_static(name),
                    HeaderValue::from_static(value),
                );
            }

            if production {
                headers.insert(
                    HeaderName::from_static(HSTS.0),
                    HeaderValue::from_static(HSTS.1),
                );
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::Service as _;

    fn test_app(production: bool) -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(SecurityHeadersLayer::new(production))
    }

    async fn ping(app: &mut Router) -> Response {
        app.call(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_baseline_headers_present() {
        let mut app = test_app(false);
        let response = ping(&mut app).await;

        for &(name, value) in BASELINE_HEADERS {
            assert_eq!(
                response.headers().get(name).map(|v| v.to_str().unwrap()),
                Some(value),
                "missing or wrong header {name}"
            );
        }
    }

    #[tokio::test]
    async fn test_hsts_only_in_production() {
        let mut app = test_app(false);
        let response = ping(&mut app).await;
        assert!(response.headers().get(HSTS.0).is_none());

        let mut app = test_app(true);
        let response = ping(&mut app).await;
        assert!(response.headers().get(HSTS.0).is_some());
    }
}
