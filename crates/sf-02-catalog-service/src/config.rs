//! Catalog service configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::warn;

/// Catalog service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Bind address for both servers
    pub host: IpAddr,
    /// gRPC port (default: 50052)
    pub port: u16,
    /// Prometheus `/metrics` port (default: 9091)
    pub metrics_port: u16,
    /// Simulated lookup latency applied to every `GetProductById`
    #[serde(with = "millis")]
    pub lookup_delay: Duration,
    /// Answer unknown ids with a sample product instead of `NOT_FOUND`
    pub sample_fallback: bool,
    /// Answer every `GetProductById` with the sample product
    pub echo_lookups: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 50052,
            metrics_port: 9091,
            lookup_delay: Duration::from_secs(2),
            sample_fallback: true,
            echo_lookups: false,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `SF_CATALOG_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(port) = env_parse("SF_CATALOG_PORT") {
            config.port = port;
        }
        if let Some(port) = env_parse("SF_CATALOG_METRICS_PORT") {
            config.metrics_port = port;
        }
        if let Some(ms) = env_parse("SF_CATALOG_LOOKUP_DELAY_MS") {
            config.lookup_delay = Duration::from_millis(ms);
        }
        if let Some(fallback) = env_parse("SF_CATALOG_SAMPLE_FALLBACK") {
            config.sample_fallback = fallback;
        }
        if let Some(echo) = env_parse("SF_CATALOG_ECHO_LOOKUPS") {
            config.echo_lookups = echo;
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port != 0 && self.port == self.metrics_port {
            return Err(ConfigError::DuplicatePorts(self.port));
        }
        Ok(())
    }

    pub fn grpc_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn metrics_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.metrics_port)
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("gRPC and metrics servers both configured on port {0}")]
    DuplicatePorts(u16),
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

/// Durations as integer milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
