//! RPC client stub for the catalog backend.
//!
//! One `tonic` channel is created when the gateway starts and cloned into
//! every call; clones share the underlying HTTP/2 connection. The channel is
//! lazy, so the gateway can start before the catalog does. Each call is
//! bounded by the configured per-call timeout.

use async_trait::async_trait;
use shared_types::{CatalogServiceClient, GetProductByIdRequest, ListProductsRequest, Product};
use std::future::Future;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};
use tracing::{debug, warn};

use crate::domain::config::CatalogBackendConfig;
use crate::domain::error::{CatalogClientError, GatewayError};
use crate::ports::CatalogApi;

/// gRPC implementation of [`CatalogApi`].
#[derive(Clone)]
pub struct GrpcCatalogClient {
    client: CatalogServiceClient<Channel>,
    timeout: Duration,
}

impl GrpcCatalogClient {
    /// Build the shared channel. No connection attempt is made until the
    /// first call.
    ///
    /// Must be called inside a tokio runtime.
    pub fn connect_lazy(config: &CatalogBackendConfig) -> Result<Self, GatewayError> {
        let endpoint = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| {
                GatewayError::Client(format!(
                    "invalid catalog endpoint {}: {}",
                    config.endpoint, e
                ))
            })?
            .connect_timeout(config.connect_timeout)
            .tcp_nodelay(true);

        debug!(endpoint = %config.endpoint, timeout_ms = config.timeout.as_millis() as u64, "Catalog channel created");
        Ok(Self::from_channel(endpoint.connect_lazy(), config.timeout))
    }

    /// Wrap an existing channel.
    pub fn from_channel(channel: Channel, timeout: Duration) -> Self {
        Self {
            client: CatalogServiceClient::new(channel),
            timeout,
        }
    }

    /// Per-call timeout applied to every RPC.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, Status>
    where
        F: Future<Output = Result<tonic::Response<T>, Status>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map(tonic::Response::into_inner),
            Err(_) => Err(Status::deadline_exceeded(format!(
                "no reply within {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl CatalogApi for GrpcCatalogClient {
    async fn get_product_by_id(&self, id: i32) -> Result<Product, CatalogClientError> {
        let mut client = self.client.clone();
        self.bounded(client.get_product_by_id(GetProductByIdRequest { id }))
            .await
            .map_err(|status| map_status(status, Some(id), self.timeout))
    }

    async fn list_products(&self) -> Result<Vec<Product>, CatalogClientError> {
        let mut client = self.client.clone();
        self.bounded(client.list_products(ListProductsRequest {}))
            .await
            .map(|response| response.products)
            .map_err(|status| map_status(status, None, self.timeout))
    }
}

/// Fold a gRPC status into the stub's error domain.
///
/// Only an explicit `NOT_FOUND` on a keyed lookup is a miss; everything else,
/// including our own deadline, is an availability failure.
fn map_status(status: Status, id: Option<i32>, timeout: Duration) -> CatalogClientError {
    match (status.code(), id) {
        (Code::NotFound, Some(id)) => CatalogClientError::NotFound(id),
        (Code::DeadlineExceeded, _) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "Catalog call exceeded deadline");
            CatalogClientError::Timeout(timeout)
        }
        (code, _) => CatalogClientError::Unavailable(format!("{:?}: {}", code, status.message())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[test]
    fn test_not_found_on_lookup() {
        assert_eq!(
            map_status(Status::not_found("no such product"), Some(4), TIMEOUT),
            CatalogClientError::NotFound(4)
        );
    }

    #[test]
    fn test_not_found_on_listing_is_unavailable() {
        assert!(matches!(
            map_status(Status::not_found("gone"), None, TIMEOUT),
            CatalogClientError::Unavailable(_)
        ));
    }

    #[test]
    fn test_deadline_is_timeout() {
        assert_eq!(
            map_status(Status::deadline_exceeded("slow"), Some(1), TIMEOUT),
            CatalogClientError::Timeout(TIMEOUT)
        );
    }

    #[test]
    fn test_transport_fault_is_unavailable() {
        let err = map_status(Status::unavailable("connection refused"), Some(1), TIMEOUT);
        assert!(matches!(err, CatalogClientError::Unavailable(ref msg) if msg.contains("connection refused")));
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = CatalogBackendConfig {
            endpoint: "not a uri".into(),
            ..Default::default()
        };
        assert!(matches!(
            GrpcCatalogClient::connect_lazy(&config),
            Err(GatewayError::Client(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable_not_hang() {
        // Port 1 on loopback refuses connections on any sane host.
        let config = CatalogBackendConfig {
            endpoint: "http://127.0.0.1:1".into(),
            timeout: Duration::from_millis(500),
            connect_timeout: Duration::from_millis(200),
        };
        let client = GrpcCatalogClient::connect_lazy(&config).unwrap();
        let err = client.get_product_by_id(1).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogClientError::Unavailable(_) | CatalogClientError::Timeout(_)
        ));
    }
}
