//! Clients for the two ways of reaching the Storefront backends.

use std::time::Duration;

use reqwest::Client;
use shared_types::{
    CatalogServiceClient, CredentialPayload, CredentialResponse, GetProductByIdRequest, Product,
    LOGIN_PATH, SIGNUP_PATH,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when talking to a Storefront service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),
    #[error("Request rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Signup details.
#[derive(Debug, Clone)]
pub struct Signup {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Turn a credential response body into a verdict.
///
/// Bodies that are not a JSON verdict (for example the auth server's
/// plain-text parse error) become a failed verdict carrying the raw text.
pub fn decode_verdict(body: &str) -> CredentialResponse {
    serde_json::from_str(body)
        .unwrap_or_else(|_| CredentialResponse::failure(body.trim_end().to_string()))
}

/// Talks to the auth and catalog services directly.
pub struct DirectClient {
    http: Client,
    auth_url: String,
    catalog_url: String,
    rpc_timeout: Duration,
}

impl DirectClient {
    pub fn new(auth_url: &str, catalog_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: http_client()?,
            auth_url: auth_url.trim_end_matches('/').to_string(),
            catalog_url: catalog_url.to_string(),
            rpc_timeout: Duration::from_secs(5),
        })
    }

    pub async fn signup(&self, signup: &Signup) -> Result<CredentialResponse, ClientError> {
        let payload = CredentialPayload {
            first_name: Some(signup.first_name.clone()),
            last_name: Some(signup.last_name.clone()),
            email: signup.email.clone(),
            password: signup.password.clone(),
        };
        self.post(SIGNUP_PATH, &payload).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<CredentialResponse, ClientError> {
        let payload = CredentialPayload {
            email: email.to_string(),
            password: password.to_string(),
            ..Default::default()
        };
        self.post(LOGIN_PATH, &payload).await
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, ClientError> {
        let mut client = CatalogServiceClient::connect(self.catalog_url.clone())
            .await
            .map_err(|e| ClientError::Connection(format!("{}: {}", self.catalog_url, e)))?;

        let mut request = tonic::Request::new(GetProductByIdRequest { id });
        request.set_timeout(self.rpc_timeout);
        Ok(client.get_product_by_id(request).await?.into_inner())
    }

    async fn post(
        &self,
        path: &str,
        payload: &CredentialPayload,
    ) -> Result<CredentialResponse, ClientError> {
        let url = format!("{}{}", self.auth_url, path);
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| connection_error(e, &url))?;

        let body = response.text().await?;
        debug!(%url, %body, "Auth response body");
        Ok(decode_verdict(&body))
    }
}

/// Talks to the API gateway only.
pub struct GatewayClient {
    http: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn signup(&self, signup: &Signup) -> Result<CredentialResponse, ClientError> {
        let query = [
            ("firstName", signup.first_name.as_str()),
            ("lastName", signup.last_name.as_str()),
            ("email", signup.email.as_str()),
            ("password", signup.password.as_str()),
        ];
        let body = self.get("/signup", &query).await?;
        Ok(decode_verdict(&body))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<CredentialResponse, ClientError> {
        let body = self
            .get("/login", &[("email", email), ("password", password)])
            .await?;
        Ok(decode_verdict(&body))
    }

    /// Product line as rendered by the gateway.
    pub async fn get_product(&self, id: i32) -> Result<String, ClientError> {
        let id = id.to_string();
        self.get("/getProduct", &[("id", id.as_str())]).await
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| connection_error(e, &url))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                body: body.trim_end().to_string(),
            });
        }
        Ok(body)
    }
}

fn http_client() -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(2))
        .build()?)
}

fn connection_error(e: reqwest::Error, url: &str) -> ClientError {
    if e.is_connect() {
        ClientError::Connection(format!("Cannot connect to {}", url))
    } else {
        ClientError::Http(e)
    }
}
