//! Domain types for the API Gateway.
//!
//! Configuration, the error taxonomy, request validation and the password
//! digest. Nothing in here performs I/O.

pub mod config;
pub mod digest;
pub mod error;
pub mod types;

// Re-exports for convenience
pub use config::GatewayConfig;
pub use digest::PasswordDigest;
pub use error::{ApiError, ApiResult, CatalogClientError, CredentialClientError, GatewayError};
pub use types::*;
