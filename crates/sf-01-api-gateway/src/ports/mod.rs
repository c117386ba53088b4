//! Ports (hexagonal boundaries) of the API Gateway.

pub mod outbound;

pub use outbound::{CatalogApi, CredentialApi};
