//! SF-02 Catalog Service - product lookup over gRPC.
//!
//! Serves `catalog.CatalogService` from a seeded in-memory [`Catalog`] and
//! exports `grpc_request_duration_seconds{method}` on a separate `/metrics`
//! port.
//!
//! Every `GetProductById` sleeps for the configured lookup delay (2 s by
//! default) before answering, which makes the service a convenient slow
//! backend for exercising gateway timeouts.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod runtime;
pub mod service;

pub use config::CatalogConfig;
pub use domain::Catalog;
pub use error::CatalogError;
pub use runtime::CatalogRuntime;
pub use service::{CatalogServer, RpcMetrics, GRPC_DURATION_METRIC};
