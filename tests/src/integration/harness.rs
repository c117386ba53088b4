//! In-process test stack: catalog, auth and gateway on loopback ports.

use sf_01_api_gateway::{ApiGatewayService, GatewayConfig, GatewayMetrics};
use sf_02_catalog_service::{CatalogConfig, CatalogRuntime, RpcMetrics};
use sf_03_auth_service::{AuthConfig, AuthService, InMemoryUserStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Knobs for [`Stack::start`].
#[derive(Debug, Clone)]
pub struct StackOptions {
    /// Simulated catalog lookup latency
    pub catalog_delay: Duration,
    /// Gateway per-call timeout towards the catalog
    pub catalog_timeout: Duration,
    /// Leave the catalog service down
    pub without_catalog: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            catalog_delay: Duration::ZERO,
            catalog_timeout: Duration::from_secs(5),
            without_catalog: false,
        }
    }
}

/// Running servers and their addresses.
pub struct Stack {
    pub gateway_http: SocketAddr,
    pub gateway_grpc: SocketAddr,
    pub catalog_grpc: SocketAddr,
    pub auth_http: SocketAddr,
    gateway: Arc<ApiGatewayService>,
    catalog: Option<Arc<CatalogRuntime>>,
    auth: Arc<AuthService>,
    handles: Vec<JoinHandle<()>>,
}

impl Stack {
    pub async fn start(options: StackOptions) -> std::io::Result<Self> {
        let mut handles = Vec::new();

        let catalog_grpc_listener = loopback().await?;
        let catalog_grpc = catalog_grpc_listener.local_addr()?;
        let catalog = if options.without_catalog {
            // Free the port so connections are refused.
            drop(catalog_grpc_listener);
            None
        } else {
            let metrics_listener = loopback().await?;
            let runtime = Arc::new(
                CatalogRuntime::new(CatalogConfig {
                    lookup_delay: options.catalog_delay,
                    ..Default::default()
                })
                .map_err(std::io::Error::other)?,
            );
            let server = Arc::clone(&runtime);
            handles.push(tokio::spawn(async move {
                let _ = server
                    .serve_with_listeners(catalog_grpc_listener, metrics_listener)
                    .await;
            }));
            Some(runtime)
        };

        let auth_listener = loopback().await?;
        let auth_http = auth_listener.local_addr()?;
        let auth = Arc::new(
            AuthService::new(AuthConfig::default(), Arc::new(InMemoryUserStore::new()))
                .map_err(std::io::Error::other)?,
        );
        {
            let server = Arc::clone(&auth);
            handles.push(tokio::spawn(async move {
                let _ = server.serve_with_listener(auth_listener).await;
            }));
        }

        let mut config = GatewayConfig::default();
        config.catalog.endpoint = format!("http://{}", catalog_grpc);
        config.catalog.timeout = options.catalog_timeout;
        config.credentials.base_url = format!("http://{}", auth_http);

        let http_listener = loopback().await?;
        let grpc_listener = loopback().await?;
        let gateway_http = http_listener.local_addr()?;
        let gateway_grpc = grpc_listener.local_addr()?;
        let gateway = Arc::new(ApiGatewayService::connect(config).map_err(std::io::Error::other)?);
        {
            let server = Arc::clone(&gateway);
            handles.push(tokio::spawn(async move {
                let _ = server
                    .serve_with_listeners(http_listener, Some(grpc_listener))
                    .await;
            }));
        }

        Ok(Self {
            gateway_http,
            gateway_grpc,
            catalog_grpc,
            auth_http,
            gateway,
            catalog,
            auth,
            handles,
        })
    }

    /// Gateway URL for `path_and_query`.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.gateway_http, path_and_query)
    }

    pub fn gateway_metrics(&self) -> Arc<GatewayMetrics> {
        self.gateway.metrics()
    }

    pub fn catalog_metrics(&self) -> Option<&RpcMetrics> {
        self.catalog.as_deref().map(CatalogRuntime::metrics)
    }

    /// Shut every server down and wait for them to exit.
    pub async fn stop(self) {
        self.gateway.shutdown();
        self.auth.shutdown();
        if let Some(catalog) = &self.catalog {
            catalog.shutdown();
        }
        for handle in self.handles {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }
}

async fn loopback() -> std::io::Result<TcpListener> {
    TcpListener::bind("127.0.0.1:0").await
}
