//! Request span middleware.
//!
//! Wraps every inbound request in an `api_request` span carrying the method,
//! path, the caller's W3C trace id (if any) and, once the handler returns,
//! the response status.

use axum::{body::Body, http::Request, response::Response};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{debug, field, info_span, Instrument, Span};

/// Tracing layer that creates spans for each request
#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

/// Tracing service
#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Take the service that was driven to readiness, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let span = info_span!(
            "api_request",
            http.method = %req.method(),
            http.target = %req.uri().path(),
            trace_id = field::Empty,
            http.status_code = field::Empty,
        );
        if let Some(trace_id) = extract_trace_id(&req) {
            span.record("trace_id", trace_id);
        }

        Box::pin(
            async move {
                let started = Instant::now();
                let result = inner.call(req).await;

                if let Ok(response) = &result {
                    let status = response.status().as_u16();
                    Span::current().record("http.status_code", status);
                    debug!(
                        status,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Request completed"
                    );
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Trace id from a W3C `traceparent` header
/// (`version-trace_id-parent_id-trace_flags`).
fn extract_trace_id<B>(req: &Request<B>) -> Option<&str> {
    let traceparent = req.headers().get("traceparent")?.to_str().ok()?;

    let parts: Vec<&str> = traceparent.split('-').collect();
    if parts.len() != 4 || parts[1].len() != 32 {
        return None;
    }

    Some(parts[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_traceparent_parsing() {
        let req = Request::builder()
            .header(
                "traceparent",
                "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01",
            )
            .body(Body::empty())
            .unwrap();

        assert_eq!(
            extract_trace_id(&req),
            Some("0af7651916cd43dd8448eb211c80319c")
        );
    }

    #[test]
    fn test_invalid_traceparent() {
        let req = Request::builder()
            .header("traceparent", "invalid")
            .body(Body::empty())
            .unwrap();

        assert!(extract_trace_id(&req).is_none());
    }

    #[test]
    fn test_no_traceparent() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert!(extract_trace_id(&req).is_none());
    }

    #[tokio::test]
    async fn test_layer_passes_response_through() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(TracingLayer::new());

        let response = app
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
