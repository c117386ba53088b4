//! SF-01 API Gateway - HTTP front for the Storefront backends.
//!
//! Accepts plain HTTP `GET` requests, validates their query parameters and
//! forwards each one to exactly one backend: the catalog service over gRPC or
//! the credential service over JSON/HTTP. Latency of every forwarded request
//! is recorded in a Prometheus histogram.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (sf-01)                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────┐          ┌──────────────────┐          │
//! │  │       HTTP       │          │ gRPC passthrough │          │
//! │  │    Port 50061    │          │    Port 50051    │          │
//! │  └────────┬─────────┘          └────────┬─────────┘          │
//! │           │ TracingLayer                │                    │
//! │  ┌────────┴─────────┐                   │                    │
//! │  │    Dispatcher    │── RequestTimer ──► GatewayMetrics      │
//! │  └───┬──────────┬───┘                   │                    │
//! │      │          │                       │                    │
//! │  ┌───┴───────┐ ┌┴──────────────────┐    │                    │
//! │  │ CatalogApi│ │   CredentialApi   │◄───┘                    │
//! │  └───┬───────┘ └┬──────────────────┘                         │
//! └──────┼──────────┼────────────────────────────────────────────┘
//!        ▼          ▼
//!  sf-02-catalog   sf-03-auth
//!   (gRPC 50052)   (HTTP 50053)
//! ```
//!
//! # Routes
//!
//! | Route | Backend | Success body |
//! |-------|---------|--------------|
//! | `GET /getProduct?id=` | catalog | `Product: id:.. name:".." price:..` |
//! | `GET /signup?firstName=&lastName=&email=&password=` | credentials | JSON verdict |
//! | `GET /login?email=&password=` | credentials | JSON verdict |
//! | `GET /metrics` | none | Prometheus text |
//! | `GET /health` | none | JSON status |
//!
//! Passwords are replaced by their SHA-256 hex digest before leaving the
//! gateway.
//!
//! # Usage
//!
//! ```ignore
//! use sf_01_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let service = ApiGatewayService::connect(GatewayConfig::from_env())?;
//! service.start().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod dispatcher;
pub mod domain;
pub mod grpc;
pub mod middleware;
pub mod ports;
pub mod service;

// Re-exports for public API
pub use dispatcher::Dispatcher;
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::types::*;
pub use middleware::GatewayMetrics;
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
