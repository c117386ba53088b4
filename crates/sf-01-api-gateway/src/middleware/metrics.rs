//! Metrics recorder for the gateway.
//!
//! A single `http_request_duration_seconds` histogram labeled by `path`,
//! exported in Prometheus text format on `GET /metrics`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use storefront_telemetry::LatencyHistogram;

use crate::domain::error::GatewayError;

/// Histogram name, kept stable for existing dashboards.
pub const HTTP_DURATION_METRIC: &str = "http_request_duration_seconds";

/// API Gateway metrics
///
/// Constructed once at startup and shared by every request task. Safe for
/// concurrent observation and export.
#[derive(Clone)]
pub struct GatewayMetrics {
    latency: LatencyHistogram,
}

impl GatewayMetrics {
    pub fn new() -> Result<Self, GatewayError> {
        let latency =
            LatencyHistogram::new(HTTP_DURATION_METRIC, "Duration of HTTP requests.", "path")?;
        Ok(Self { latency })
    }

    /// Record one latency observation for `route`.
    pub fn observe(&self, route: &str, elapsed: Duration) {
        self.latency.observe(route, elapsed.as_secs_f64());
    }

    /// Observations recorded so far for `route`.
    pub fn observation_count(&self, route: &str) -> u64 {
        self.latency.sample_count(route)
    }

    /// Export metrics in Prometheus format
    pub fn to_prometheus(&self) -> Result<String, GatewayError> {
        Ok(self.latency.encode()?)
    }

    /// Content type of [`to_prometheus`](Self::to_prometheus) output
    pub fn content_type(&self) -> &'static str {
        self.latency.content_type()
    }
}

/// Request timing helper
///
/// Started when the request arrives. Only [`finish`](Self::finish) records an
/// observation; a timer dropped on a validation failure records nothing.
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    route: &'static str,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, route: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            route,
        }
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        self.metrics.observe(self.route, elapsed);
        elapsed
    }
}
