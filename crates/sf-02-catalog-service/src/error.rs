//! Catalog service errors.

use storefront_telemetry::TelemetryError;

/// Startup and lifecycle errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("metrics error: {0}")]
    Metrics(#[from] TelemetryError),

    #[error("server error: {0}")]
    Server(String),
}
