//! API Gateway service: wiring, routing and server lifecycle.
//!
//! Runs the HTTP server and, when enabled, the gRPC passthrough. Both stop on
//! [`ApiGatewayService::shutdown`].

use axum::{
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use shared_types::{CatalogServiceServer, CredentialResponse};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::{error, info};

use crate::adapters::{GrpcCatalogClient, HttpCredentialClient};
use crate::dispatcher::{routes, Dispatcher};
use crate::domain::config::GatewayConfig;
use crate::domain::error::{ApiResult, GatewayError};
use crate::domain::types::{LoginQuery, ProductQuery, SignupQuery};
use crate::grpc::CatalogPassthrough;
use crate::middleware::{GatewayMetrics, TracingLayer};
use crate::ports::{CatalogApi, CredentialApi};

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
    shutdown_tx: watch::Sender<bool>,
}

impl ApiGatewayService {
    /// Build the service with network clients for both backends.
    ///
    /// The catalog channel is lazy; neither backend has to be up yet.
    pub fn connect(config: GatewayConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let metrics = Arc::new(GatewayMetrics::new()?);
        let catalog = Arc::new(GrpcCatalogClient::connect_lazy(&config.catalog)?);
        let credentials = Arc::new(HttpCredentialClient::new(&config.credentials)?);

        Ok(Self::new(config, catalog, credentials, metrics))
    }

    /// Build the service around existing backend clients.
    pub fn new(
        config: GatewayConfig,
        catalog: Arc<dyn CatalogApi>,
        credentials: Arc<dyn CredentialApi>,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(
            catalog,
            credentials,
            Arc::clone(&metrics),
        ));
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            config,
            dispatcher,
            metrics,
            shutdown_tx,
        }
    }

    /// Bind the configured addresses and serve until shutdown.
    pub async fn start(&self) -> Result<(), GatewayError> {
        info!("Starting API Gateway...");

        let http_addr = self.config.http_addr();
        let http = TcpListener::bind(http_addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", http_addr, e)))?;

        let grpc = if self.config.grpc.enabled {
            let grpc_addr = self.config.grpc_addr();
            let listener = TcpListener::bind(grpc_addr)
                .await
                .map_err(|e| GatewayError::Bind(format!("{}: {}", grpc_addr, e)))?;
            Some(listener)
        } else {
            None
        };

        self.serve_with_listeners(http, grpc).await
    }

    /// Serve on already-bound listeners until shutdown.
    pub async fn serve_with_listeners(
        &self,
        http: TcpListener,
        grpc: Option<TcpListener>,
    ) -> Result<(), GatewayError> {
        let http_addr = http
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let router = self.router();
        let http_shutdown = wait_for_shutdown(self.shutdown_tx.subscribe());

        info!(addr = %http_addr, catalog = %self.config.catalog.endpoint, credentials = %self.config.credentials.base_url, "Starting HTTP server");
        let http_handle = tokio::spawn(async move {
            axum::serve(http, router)
                .with_graceful_shutdown(http_shutdown)
                .await
        });

        let grpc_handle = match grpc {
            Some(listener) => {
                let grpc_addr = listener
                    .local_addr()
                    .map_err(|e| GatewayError::Bind(e.to_string()))?;
                let service =
                    CatalogServiceServer::new(CatalogPassthrough::new(self.dispatcher.catalog()));
                let grpc_shutdown = wait_for_shutdown(self.shutdown_tx.subscribe());

                info!(addr = %grpc_addr, "Starting gRPC passthrough");
                Some(tokio::spawn(async move {
                    tonic::transport::Server::builder()
                        .add_service(service)
                        .serve_with_incoming_shutdown(
                            TcpListenerStream::new(listener),
                            grpc_shutdown,
                        )
                        .await
                }))
            }
            None => None,
        };

        info!("API Gateway started successfully");

        let mut outcome = Ok(());
        match http_handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(error = %e, "HTTP server error");
                outcome = Err(GatewayError::Server(format!("http: {}", e)));
            }
            Err(e) => outcome = Err(GatewayError::Server(format!("http task: {}", e))),
        }

        if let Some(handle) = grpc_handle {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!(error = %e, "gRPC server error");
                    outcome = outcome.and(Err(GatewayError::Server(format!("grpc: {}", e))));
                }
                Err(e) => {
                    outcome = outcome.and(Err(GatewayError::Server(format!("grpc task: {}", e))))
                }
            }
        }

        info!("API Gateway stopped");
        outcome
    }

    /// Trigger graceful shutdown of every server started by this service.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.metrics)
    }

    /// HTTP router with every gateway route.
    pub fn router(&self) -> Router {
        Router::new()
            .route(routes::GET_PRODUCT, get(get_product))
            .route(routes::SIGNUP, get(signup))
            .route(routes::LOGIN, get(login))
            .route(routes::METRICS, get(metrics))
            .route(routes::HEALTH, get(health_check))
            .layer(TracingLayer::new())
            .with_state(Arc::clone(&self.dispatcher))
    }
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

async fn get_product(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(query): Query<ProductQuery>,
) -> ApiResult<String> {
    dispatcher.get_product(query).await
}

async fn signup(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(query): Query<SignupQuery>,
) -> ApiResult<Json<CredentialResponse>> {
    dispatcher.signup(query).await.map(Json)
}

async fn login(
    State(dispatcher): State<Arc<Dispatcher>>,
    Query(query): Query<LoginQuery>,
) -> ApiResult<Json<CredentialResponse>> {
    dispatcher.login(query).await.map(Json)
}

async fn metrics(State(dispatcher): State<Arc<Dispatcher>>) -> impl IntoResponse {
    dispatcher
        .metrics()
        .map(|body| ([(CONTENT_TYPE, dispatcher.metrics_content_type())], body))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "sf-api-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
