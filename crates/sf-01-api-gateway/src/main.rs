//! # Storefront API Gateway
//!
//! Binary entry point. Configuration comes from `SF_*` environment
//! variables; see [`GatewayConfig::from_env`].

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use sf_01_api_gateway::{ApiGatewayService, GatewayConfig, VERSION};
use storefront_telemetry::{init_logging, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::for_service("sf-api-gateway"))?;
    info!(version = VERSION, "Storefront API Gateway");

    let config = GatewayConfig::from_env();
    let service = Arc::new(
        ApiGatewayService::connect(config).context("failed to initialize API gateway")?,
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
