//! Auth service configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

/// Auth service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bind address
    pub host: IpAddr,
    /// HTTP port (default: 50053)
    pub port: u16,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 50053,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl AuthConfig {
    /// Defaults overridden by `SF_AUTH_PORT`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = env::var("SF_AUTH_PORT") {
            match raw.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => warn!(variable = "SF_AUTH_PORT", value = %raw, "Ignoring unparseable environment override"),
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit);
        }
        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("max_body_bytes cannot be 0")]
    InvalidBodyLimit,
}
