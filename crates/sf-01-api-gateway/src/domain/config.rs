//! Gateway configuration with validation.
//!
//! Every endpoint and port is configurable; defaults match the ports the
//! Storefront services have always used. [`GatewayConfig::from_env`] applies
//! `SF_*` overrides on top of the defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::warn;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// gRPC passthrough server configuration
    pub grpc: GrpcConfig,
    /// Catalog backend (gRPC) configuration
    pub catalog: CatalogBackendConfig,
    /// Credential backend (JSON over HTTP) configuration
    pub credentials: CredentialBackendConfig,
}

impl GatewayConfig {
    /// Defaults overridden by `SF_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(host) = env_parse::<IpAddr>("SF_HTTP_HOST") {
            config.http.host = host;
            config.grpc.host = host;
        }
        if let Some(port) = env_parse("SF_HTTP_PORT") {
            config.http.port = port;
        }
        if let Some(enabled) = env_parse("SF_GRPC_ENABLED") {
            config.grpc.enabled = enabled;
        }
        if let Some(port) = env_parse("SF_GRPC_PORT") {
            config.grpc.port = port;
        }
        if let Ok(endpoint) = env::var("SF_CATALOG_ENDPOINT") {
            config.catalog.endpoint = endpoint;
        }
        if let Some(ms) = env_parse("SF_CATALOG_TIMEOUT_MS") {
            config.catalog.timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse("SF_CATALOG_CONNECT_TIMEOUT_MS") {
            config.catalog.connect_timeout = Duration::from_millis(ms);
        }
        if let Ok(base_url) = env::var("SF_AUTH_BASE_URL") {
            config.credentials.base_url = base_url;
        }
        if let Some(ms) = env_parse("SF_AUTH_TIMEOUT_MS") {
            config.credentials.timeout = Duration::from_millis(ms);
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grpc.enabled && self.grpc.port == self.http.port && self.http.port != 0 {
            return Err(ConfigError::DuplicatePorts);
        }

        if self.catalog.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "catalog timeout cannot be 0".into(),
            ));
        }

        if self.credentials.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "credential timeout cannot be 0".into(),
            ));
        }

        if !is_http_url(&self.catalog.endpoint) {
            return Err(ConfigError::InvalidEndpoint(self.catalog.endpoint.clone()));
        }

        if !is_http_url(&self.credentials.base_url) {
            return Err(ConfigError::InvalidEndpoint(
                self.credentials.base_url.clone(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Get gRPC passthrough bind address
    pub fn grpc_addr(&self) -> SocketAddr {
        SocketAddr::new(self.grpc.host, self.grpc.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 50061)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 50061,
        }
    }
}

/// gRPC passthrough server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 50051)
    pub port: u16,
    /// Serve `catalog.CatalogService` on the gateway as well
    pub enabled: bool,
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 50051,
            enabled: true,
        }
    }
}

/// Catalog backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogBackendConfig {
    /// gRPC endpoint URI
    pub endpoint: String,
    /// Per-call timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Timeout for establishing the shared channel
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
}

impl Default for CatalogBackendConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50052".to_string(),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

/// Credential backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialBackendConfig {
    /// Base URL; operation paths are appended
    pub base_url: String,
    /// Whole-exchange timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CredentialBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:50053".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// HTTP and gRPC servers on the same port
    #[error("duplicate ports configured")]
    DuplicatePorts,
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Backend address is not an http(s) URL
    #[error("invalid backend endpoint: {0}")]
    InvalidEndpoint(String),
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
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

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // "ms" must be checked before the bare "s" and "m" suffixes.
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| "invalid minutes")
        } else {
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
