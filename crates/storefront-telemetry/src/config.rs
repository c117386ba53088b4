//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,

    /// Whether to include thread ids in log lines
    pub thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "storefront".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            thread_ids: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// - `SF_SERVICE_NAME`: Service name (default: storefront)
    /// - `SF_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SF_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("SF_SERVICE_NAME").unwrap_or_else(|_| "storefront".to_string()),

            log_level: env::var("SF_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("SF_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            thread_ids: true,
        }
    }

    /// Create configuration for a specific binary.
    pub fn for_service(service_name: &str) -> Self {
        let mut config = Self::from_env();
        if env::var("SF_SERVICE_NAME").is_err() {
            config.service_name = service_name.to_string();
        }
        config
    }
}
