//! # Storefront Catalog Service
//!
//! Configuration comes from `SF_CATALOG_*` environment variables.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use sf_02_catalog_service::{CatalogConfig, CatalogRuntime};
use storefront_telemetry::{init_logging, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&TelemetryConfig::for_service("sf-catalog-service"))?;

    let runtime = Arc::new(
        CatalogRuntime::new(CatalogConfig::from_env())
            .context("failed to initialize catalog service")?,
    );

    {
        let runtime = Arc::clone(&runtime);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C, shutting down"),
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C, shutting down"),
            }
            runtime.shutdown();
        });
    }

    runtime.start().await?;
    Ok(())
}
