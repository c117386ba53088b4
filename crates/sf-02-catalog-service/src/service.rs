//! `catalog.CatalogService` implementation.

use shared_types::{
    CatalogService, GetProductByIdRequest, ListProductsRequest, ListProductsResponse, Product,
};
use std::time::{Duration, Instant};
use storefront_telemetry::LatencyHistogram;
use tonic::{Request, Response, Status};
use tracing::{info, warn};

use crate::domain::Catalog;
use crate::error::CatalogError;

/// Histogram name exported on the metrics port.
pub const GRPC_DURATION_METRIC: &str = "grpc_request_duration_seconds";

/// Per-method RPC latency.
#[derive(Clone)]
pub struct RpcMetrics {
    latency: LatencyHistogram,
}

impl RpcMetrics {
    pub fn new() -> Result<Self, CatalogError> {
        let latency =
            LatencyHistogram::new(GRPC_DURATION_METRIC, "Duration of gRPC requests.", "method")?;
        Ok(Self { latency })
    }

    pub fn observation_count(&self, method: &str) -> u64 {
        self.latency.sample_count(method)
    }

    pub fn to_prometheus(&self) -> Result<String, CatalogError> {
        Ok(self.latency.encode()?)
    }

    pub fn content_type(&self) -> &'static str {
        self.latency.content_type()
    }
}

/// gRPC front of the [`Catalog`].
pub struct CatalogServer {
    catalog: Catalog,
    lookup_delay: Duration,
    metrics: RpcMetrics,
}

impl CatalogServer {
    pub fn new(catalog: Catalog, lookup_delay: Duration, metrics: RpcMetrics) -> Self {
        Self {
            catalog,
            lookup_delay,
            metrics,
        }
    }
}

#[tonic::async_trait]
impl CatalogService for CatalogServer {
    async fn get_product_by_id(
        &self,
        request: Request<GetProductByIdRequest>,
    ) -> Result<Response<Product>, Status> {
        let _timer = self.metrics.latency.start_timer("GetProductById");
        let started = Instant::now();
        let id = request.into_inner().id;
        info!(product_id = id, "Received request for product");

        if !self.lookup_delay.is_zero() {
            tokio::time::sleep(self.lookup_delay).await;
        }

        match self.catalog.get(id) {
            Some(product) => {
                info!(
                    product_id = id,
                    name = %product.name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Responding with product"
                );
                Ok(Response::new(product))
            }
            None => {
                warn!(product_id = id, "Product not found");
                Err(Status::not_found(format!("product {} not found", id)))
            }
        }
    }

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let _timer = self.metrics.latency.start_timer("ListProducts");
        let products = self.catalog.list();
        info!(count = products.len(), "Listing products");
        Ok(Response::new(ListProductsResponse { products }))
    }
}
