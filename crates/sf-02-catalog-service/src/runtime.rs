//! Server lifecycle: the gRPC server plus the Prometheus metrics endpoint.

use axum::{extract::State, http::header::CONTENT_TYPE, response::IntoResponse, routing::get};
use axum::{http::StatusCode, Router};
use shared_types::CatalogServiceServer;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::{error, info};

use crate::config::CatalogConfig;
use crate::domain::Catalog;
use crate::error::CatalogError;
use crate::service::{CatalogServer, RpcMetrics};

/// Catalog service runtime
pub struct CatalogRuntime {
    config: CatalogConfig,
    metrics: RpcMetrics,
    shutdown_tx: watch::Sender<bool>,
}

impl CatalogRuntime {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;
        let (shutdown_tx, _) = watch::channel(false);
        Ok(Self {
            config,
            metrics: RpcMetrics::new()?,
            shutdown_tx,
        })
    }

    /// Bind both configured ports and serve until shutdown.
    pub async fn start(&self) -> Result<(), CatalogError> {
        let grpc = bind(self.config.grpc_addr().to_string()).await?;
        let metrics = bind(self.config.metrics_addr().to_string()).await?;
        self.serve_with_listeners(grpc, metrics).await
    }

    /// Serve on already-bound listeners until shutdown.
    pub async fn serve_with_listeners(
        &self,
        grpc: TcpListener,
        metrics: TcpListener,
    ) -> Result<(), CatalogError> {
        let server = CatalogServer::new(
            Catalog::seeded(self.config.sample_fallback)
                .with_echo_lookups(self.config.echo_lookups),
            self.config.lookup_delay,
            self.metrics.clone(),
        );

        info!(
            addr = %local_addr(&grpc)?,
            lookup_delay_ms = self.config.lookup_delay.as_millis() as u64,
            sample_fallback = self.config.sample_fallback,
            echo_lookups = self.config.echo_lookups,
            "Starting gRPC server"
        );
        let grpc_shutdown = wait_for_shutdown(self.shutdown_tx.subscribe());
        let grpc_handle = tokio::spawn(async move {
            tonic::transport::Server::builder()
                .add_service(CatalogServiceServer::new(server))
                .serve_with_incoming_shutdown(TcpListenerStream::new(grpc), grpc_shutdown)
                .await
        });

        info!(addr = %local_addr(&metrics)?, "Starting metrics HTTP server");
        let router = Router::new()
            .route("/metrics", get(export_metrics))
            .with_state(self.metrics.clone());
        let metrics_shutdown = wait_for_shutdown(self.shutdown_tx.subscribe());
        let metrics_handle = tokio::spawn(async move {
            axum::serve(metrics, router)
                .with_graceful_shutdown(metrics_shutdown)
                .await
        });

        let grpc_result = match grpc_handle.await {
            Ok(result) => result.map_err(|e| CatalogError::Server(format!("grpc: {}", e))),
            Err(e) => Err(CatalogError::Server(format!("grpc task: {}", e))),
        };
        let metrics_result = match metrics_handle.await {
            Ok(result) => result.map_err(|e| CatalogError::Server(format!("metrics: {}", e))),
            Err(e) => Err(CatalogError::Server(format!("metrics task: {}", e))),
        };

        if let Err(e) = grpc_result.as_ref().and(metrics_result.as_ref()) {
            error!(error = %e, "Catalog server stopped with error");
        }
        info!("Catalog service stopped");
        grpc_result.and(metrics_result)
    }

    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    pub fn metrics(&self) -> &RpcMetrics {
        &self.metrics
    }
}

async fn export_metrics(State(metrics): State<RpcMetrics>) -> impl IntoResponse {
    match metrics.to_prometheus() {
        Ok(body) => Ok(([(CONTENT_TYPE, metrics.content_type())], body)),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics\n"))
        }
    }
}

async fn bind(addr: String) -> Result<TcpListener, CatalogError> {
    TcpListener::bind(&addr)
        .await
        .map_err(|e| CatalogError::Bind(format!("{}: {}", addr, e)))
}

fn local_addr(listener: &TcpListener) -> Result<std::net::SocketAddr, CatalogError> {
    listener
        .local_addr()
        .map_err(|e| CatalogError::Bind(e.to_string()))
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CatalogServiceClient, GetProductByIdRequest};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_serves_grpc_and_metrics_until_shutdown() {
        let runtime = Arc::new(
            CatalogRuntime::new(CatalogConfig {
                lookup_delay: Duration::ZERO,
                ..Default::default()
            })
            .unwrap(),
        );
        let grpc = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let metrics = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let grpc_addr = grpc.local_addr().unwrap();
        let metrics_addr = metrics.local_addr().unwrap();

        let server = {
            let runtime = Arc::clone(&runtime);
            tokio::spawn(async move { runtime.serve_with_listeners(grpc, metrics).await })
        };

        let mut client = CatalogServiceClient::connect(format!("http://{}", grpc_addr))
            .await
            .unwrap();
        let product = client
            .get_product_by_id(GetProductByIdRequest { id: 3 })
            .await
            .unwrap()
            .into_inner();
        assert_eq!(product.name, "Product 3");

        let body = reqwest::get(format!("http://{}/metrics", metrics_addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("grpc_request_duration_seconds_count{method=\"GetProductById\"} 1"));

        drop(client);
        runtime.shutdown();
        assert!(server.await.unwrap().is_ok());
    }
}
