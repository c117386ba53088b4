//! Credential gateway client.
//!
//! POSTs a JSON [`CredentialPayload`](shared_types::CredentialPayload) and
//! decodes a [`CredentialResponse`] from the body. The credential service
//! answers logical failures with 400/401 and a well-formed verdict, so the
//! HTTP status is logged but never used to decide success.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use shared_types::CredentialResponse;
use std::time::Duration;
use tracing::debug;

use crate::domain::config::CredentialBackendConfig;
use crate::domain::error::{CredentialClientError, GatewayError};
use crate::domain::types::CredentialRequest;
use crate::ports::CredentialApi;

/// HTTP implementation of [`CredentialApi`].
#[derive(Clone)]
pub struct HttpCredentialClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCredentialClient {
    pub fn new(config: &CredentialBackendConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| GatewayError::Client(format!("credential client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, request: &CredentialRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

#[async_trait]
impl CredentialApi for HttpCredentialClient {
    async fn submit(
        &self,
        request: &CredentialRequest,
    ) -> Result<CredentialResponse, CredentialClientError> {
        let body = serde_json::to_vec(&request.to_payload())
            .map_err(|e| CredentialClientError::Marshal(e.to_string()))?;

        let response = self
            .client
            .post(self.url_for(request))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| CredentialClientError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CredentialClientError::Transport(e.to_string()))?;

        debug!(
            operation = request.kind(),
            status = status.as_u16(),
            body_len = bytes.len(),
            "Credential service replied"
        );

        serde_json::from_slice(&bytes)
            .map_err(|e| CredentialClientError::Decode(format!("status {}: {}", status, e)))
    }
}
