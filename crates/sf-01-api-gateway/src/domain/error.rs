//! Gateway error types.
//!
//! Two failure models meet here. The catalog backend speaks gRPC status
//! codes, the credential backend speaks HTTP plus a JSON verdict. Both are
//! folded into [`ApiError`] at the client boundary so that handlers only ever
//! see the caller-facing taxonomy.
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `InvalidInput` | 400 | the validation message |
//! | `NotFound` | 404 | the resource description |
//! | `UpstreamUnavailable` | 500 | generic; detail is logged only |
//!
//! A credential verdict with `success == false` is not an error at all; it is
//! relayed as a normal response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::error;

/// Caller-facing request failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Malformed or missing client-supplied fields
    #[error("{0}")]
    InvalidInput(String),

    /// Backend explicitly reported no matching record
    #[error("{0}")]
    NotFound(String),

    /// Transport, timeout, decode or marshal failure talking to a backend
    #[error("{public}: {detail}")]
    UpstreamUnavailable {
        /// Message shown to the caller
        public: String,
        /// Message written to the log
        detail: String,
    },
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn upstream(public: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            public: public.into(),
            detail: detail.into(),
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body shown to the caller; never contains backend detail.
    pub fn public_message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::NotFound(message) => message,
            Self::UpstreamUnavailable { public, .. } => public,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::UpstreamUnavailable { public, detail } = &self {
            error!(error = %detail, "{}", public);
        }
        (self.status(), format!("{}\n", self.public_message())).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a catalog RPC, as seen by the RPC client stub.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogClientError {
    /// Backend answered `NOT_FOUND`
    #[error("product {0} not found")]
    NotFound(i32),

    /// Per-call timeout elapsed
    #[error("catalog call timed out after {0:?}")]
    Timeout(Duration),

    /// Any other status or transport fault
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a credential exchange.
#[derive(Debug, thiserror::Error)]
pub enum CredentialClientError {
    /// Request could not be serialized
    #[error("failed to marshal request: {0}")]
    Marshal(String),

    /// Exchange did not complete
    #[error("failed to communicate with credential service: {0}")]
    Transport(String),

    /// Response body did not match `{success, message}`
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<CredentialClientError> for ApiError {
    fn from(e: CredentialClientError) -> Self {
        let public = match &e {
            CredentialClientError::Marshal(_) => "Failed to marshal request",
            CredentialClientError::Transport(_) => "Failed to communicate with auth server",
            CredentialClientError::Decode(_) => "Failed to decode response",
        };
        ApiError::upstream(public, e.to_string())
    }
}

/// Gateway-level errors (startup and lifecycle, not per request)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Backend client could not be constructed
    #[error("backend client error: {0}")]
    Client(String),

    /// Metrics recorder could not be constructed or exported
    #[error("metrics error: {0}")]
    Metrics(String),

    /// A server task failed while running
    #[error("server error: {0}")]
    Server(String),
}

impl From<storefront_telemetry::TelemetryError> for GatewayError {
    fn from(e: storefront_telemetry::TelemetryError) -> Self {
        GatewayError::Metrics(e.to_string())
    }
}
