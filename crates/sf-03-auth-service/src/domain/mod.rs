//! Domain types for the auth service.

pub mod config;

pub use config::{AuthConfig, ConfigError};

use shared_types::CredentialPayload;
use std::fmt;

/// A registered user.
///
/// `password` holds whatever the caller sent on signup; the gateway only ever
/// sends a SHA-256 hex digest.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Signup data before an id is assigned.
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<CredentialPayload> for NewUser {
    fn from(payload: CredentialPayload) -> Self {
        Self {
            first_name: payload.first_name.unwrap_or_default(),
            last_name: payload.last_name.unwrap_or_default(),
            email: payload.email,
            password: payload.password,
        }
    }
}

/// User store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} already exists")]
    AlreadyExists(String),
}

/// Auth service errors (startup and lifecycle)
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("server bind error: {0}")]
    Bind(String),

    #[error("server error: {0}")]
    Server(String),
}
