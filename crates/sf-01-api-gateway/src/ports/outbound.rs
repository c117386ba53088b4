//! Outbound ports for the API Gateway.
//!
//! The dispatcher depends on these traits only; the gRPC and HTTP adapters
//! implement them for production and tests substitute counting mocks.

use async_trait::async_trait;
use shared_types::{CredentialResponse, Product};

use crate::domain::error::{CatalogClientError, CredentialClientError};
use crate::domain::types::CredentialRequest;

/// Typed access to the catalog backend (Driven Port)
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Look up a single product by identifier.
    async fn get_product_by_id(&self, id: i32) -> Result<Product, CatalogClientError>;

    /// List every product in the catalog.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogClientError>;
}

/// Typed access to the credential backend (Driven Port)
///
/// Implementations relay the backend's verdict without interpreting
/// `success`.
#[async_trait]
pub trait CredentialApi: Send + Sync {
    /// Send one credential request and return the decoded verdict.
    async fn submit(
        &self,
        request: &CredentialRequest,
    ) -> Result<CredentialResponse, CredentialClientError>;
}
