//! gRPC passthrough.
//!
//! Serves `catalog.CatalogService` on the gateway's gRPC port by forwarding
//! to the catalog backend through the same client stub the HTTP handlers use.

use shared_types::{
    CatalogService, GetProductByIdRequest, ListProductsRequest, ListProductsResponse, Product,
};
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::domain::error::CatalogClientError;
use crate::ports::CatalogApi;

/// Forwards catalog RPCs to the backend.
pub struct CatalogPassthrough {
    catalog: Arc<dyn CatalogApi>,
}

impl CatalogPassthrough {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }
}

#[tonic::async_trait]
impl CatalogService for CatalogPassthrough {
    async fn get_product_by_id(
        &self,
        request: Request<GetProductByIdRequest>,
    ) -> Result<Response<Product>, Status> {
        let id = request.into_inner().id;
        debug!(product_id = id, "Forwarding GetProductById");

        self.catalog
            .get_product_by_id(id)
            .await
            .map(Response::new)
            .map_err(to_status)
    }

    async fn list_products(
        &self,
        _request: Request<ListProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        debug!("Forwarding ListProducts");

        self.catalog
            .list_products()
            .await
            .map(|products| Response::new(ListProductsResponse { products }))
            .map_err(to_status)
    }
}

fn to_status(e: CatalogClientError) -> Status {
    match e {
        CatalogClientError::NotFound(_) => Status::not_found(e.to_string()),
        other => Status::unavailable(other.to_string()),
    }
}
