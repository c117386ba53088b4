//! # Shared Types Crate
//!
//! Wire-level types used on both sides of every backend boundary.
//!
//! ## Contents
//!
//! - [`catalog`]: protobuf messages plus tonic client and server stubs for the
//!   `catalog.CatalogService` RPC surface (`GetProductById`, `ListProducts`).
//! - [`credentials`]: the JSON payloads exchanged with the credential service
//!   on `POST /signup` and `POST /login`.
//!
//! Neither module carries behavior; the gateway and the backends own all
//! semantics.

pub mod credentials;

/// Generated from `proto/catalog.proto`.
pub mod catalog {
    #![allow(clippy::all)]
    tonic::include_proto!("catalog");
}

pub use catalog::catalog_service_client::CatalogServiceClient;
pub use catalog::catalog_service_server::{CatalogService, CatalogServiceServer};
pub use catalog::{GetProductByIdRequest, ListProductsRequest, ListProductsResponse, Product};
pub use credentials::{CredentialPayload, CredentialResponse, LOGIN_PATH, SIGNUP_PATH};
