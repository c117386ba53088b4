//! # Storefront Telemetry
//!
//! Logging and metrics plumbing shared by every Storefront process.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, plain or JSON output
//! - **Metrics**: labeled Prometheus latency histograms, each owning its own
//!   registry so that a process can construct and inject them explicitly
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_telemetry::{init_logging, LatencyHistogram, TelemetryConfig};
//!
//! let config = TelemetryConfig::for_service("sf-api-gateway");
//! init_logging(&config)?;
//!
//! let latency = LatencyHistogram::new(
//!     "http_request_duration_seconds",
//!     "Duration of HTTP requests.",
//!     "path",
//! )?;
//! latency.observe("/getProduct", 0.012);
//! let exposition = latency.encode()?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SF_SERVICE_NAME` | per binary | Service name attached to startup logs |
//! | `SF_LOG_LEVEL` or `RUST_LOG` | `info` | Log level filter |
//! | `SF_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{HistogramTimer, LatencyHistogram};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Failed to encode metrics: {0}")]
    MetricsEncode(String),
}
