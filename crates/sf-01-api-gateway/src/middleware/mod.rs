//! Middleware and request instrumentation for the API Gateway.
//!
//! Layer order: Request → Tracing → Handler. Latency is recorded by the
//! handlers themselves through [`RequestTimer`] because only they know
//! whether a backend call was attempted.

pub mod metrics;
pub mod tracing;

pub use metrics::{GatewayMetrics, RequestTimer, HTTP_DURATION_METRIC};
pub use tracing::TracingLayer;
