//! Adapters for the API Gateway.
//!
//! Network implementations of the outbound ports.

pub mod catalog_client;
pub mod credential_client;

pub use catalog_client::GrpcCatalogClient;
pub use credential_client::HttpCredentialClient;
