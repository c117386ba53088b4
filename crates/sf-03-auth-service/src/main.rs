//! # Storefront Auth Service
//!
//! Listens on `SF_AUTH_PORT` (default 50053).

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use sf_03_auth_service::{AuthConfig, AuthService, InMemoryUserStore};
use storefront_telemetry::{init_logging, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::for_service("sf-auth-service"))?;

    let service = Arc::new(
        AuthService::new(AuthConfig::from_env(), Arc::new(InMemoryUserStore::new()))
            .context("failed to initialize auth service")?,
    );

    {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, shutting down"),
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
            }
            service.shutdown();
        });
    }

    service.start().await?;
    Ok(())
}
