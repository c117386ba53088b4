//! Gateway dispatcher: validation, backend invocation and response mapping.
//!
//! Each handler follows the same sequence:
//!
//! 1. start a [`RequestTimer`] on arrival
//! 2. validate the query; on failure return `InvalidInput` and drop the timer
//!    unrecorded (no backend call happened)
//! 3. make exactly one backend call, no retries
//! 4. map the outcome and build the response body, then finish the timer;
//!    the observation covers the call whether it succeeded or not and ends
//!    once the body is built, just before axum writes it
//!
//! The dispatcher holds no per-request state. The metrics recorder is the
//! only thing shared between in-flight requests.

use shared_types::CredentialResponse;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::error::{ApiError, ApiResult, CatalogClientError};
use crate::domain::types::{CredentialRequest, LoginQuery, ProductQuery, ProductView, SignupQuery};
use crate::middleware::{GatewayMetrics, RequestTimer};
use crate::ports::{CatalogApi, CredentialApi};

/// Route labels, also the HTTP paths.
pub mod routes {
    pub const GET_PRODUCT: &str = "/getProduct";
    pub const SIGNUP: &str = "/signup";
    pub const LOGIN: &str = "/login";
    pub const METRICS: &str = "/metrics";
    pub const HEALTH: &str = "/health";
}

/// Routes inbound requests to the backend clients.
pub struct Dispatcher {
    catalog: Arc<dyn CatalogApi>,
    credentials: Arc<dyn CredentialApi>,
    metrics: Arc<GatewayMetrics>,
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<dyn CatalogApi>,
        credentials: Arc<dyn CredentialApi>,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        Self {
            catalog,
            credentials,
            metrics,
        }
    }

    /// `GET /getProduct?id=<int>`, rendered as text.
    pub async fn get_product(&self, query: ProductQuery) -> ApiResult<String> {
        let timer = RequestTimer::new(Arc::clone(&self.metrics), routes::GET_PRODUCT);
        debug!("Received HTTP request for /getProduct");

        let id = query.product_id()?;
        let outcome = self.catalog.get_product_by_id(id).await;
        let result = match outcome {
            Ok(product) => Ok(ProductView(&product).to_string()),
            Err(e) => Err(catalog_error(e)),
        };

        let elapsed = timer.finish();
        info!(
            product_id = id,
            ok = result.is_ok(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Handled /getProduct"
        );
        result
    }

    /// `GET /signup`, relaying the credential verdict.
    pub async fn signup(&self, query: SignupQuery) -> ApiResult<CredentialResponse> {
        let timer = RequestTimer::new(Arc::clone(&self.metrics), routes::SIGNUP);
        let request = CredentialRequest::signup(query)?;
        self.relay(request, timer).await
    }

    /// `GET /login`, relaying the credential verdict.
    pub async fn login(&self, query: LoginQuery) -> ApiResult<CredentialResponse> {
        let timer = RequestTimer::new(Arc::clone(&self.metrics), routes::LOGIN);
        let request = CredentialRequest::login(query)?;
        self.relay(request, timer).await
    }

    /// `GET /metrics`, Prometheus text exposition.
    pub fn metrics(&self) -> ApiResult<String> {
        self.metrics
            .to_prometheus()
            .map_err(|e| ApiError::upstream("Failed to export metrics", e.to_string()))
    }

    /// Content type of the `/metrics` body.
    pub fn metrics_content_type(&self) -> &'static str {
        self.metrics.content_type()
    }

    /// Catalog client shared with the gRPC passthrough.
    pub fn catalog(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.catalog)
    }

    async fn relay(
        &self,
        request: CredentialRequest,
        timer: RequestTimer,
    ) -> ApiResult<CredentialResponse> {
        let outcome = self.credentials.submit(&request).await;
        let elapsed = timer.finish();

        match outcome {
            Ok(verdict) => {
                // A refused signup or login is still a successful exchange.
                info!(
                    operation = request.kind(),
                    success = verdict.success,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Relayed credential verdict"
                );
                Ok(verdict)
            }
            Err(e) => {
                warn!(operation = request.kind(), error = %e, "Credential exchange failed");
                Err(e.into())
            }
        }
    }
}

fn catalog_error(e: CatalogClientError) -> ApiError {
    match e {
        CatalogClientError::NotFound(_) => ApiError::not_found("Product not found"),
        other => ApiError::upstream("Failed to get product", other.to_string()),
    }
}
