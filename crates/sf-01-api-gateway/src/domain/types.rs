//! Request and response types for the gateway's HTTP surface.

use serde::Deserialize;
use shared_types::{CredentialPayload, Product};
use std::fmt;

use super::digest::PasswordDigest;
use super::error::ApiError;

/// Query of `GET /getProduct`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub id: Option<String>,
}

impl ProductQuery {
    /// Parse the product id; absent or non-integer ids are rejected.
    pub fn product_id(&self) -> Result<i32, ApiError> {
        self.id
            .as_deref()
            .and_then(|raw| raw.parse::<i32>().ok())
            .ok_or_else(|| ApiError::invalid_input("Invalid product ID"))
    }
}

/// Query of `GET /signup`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupQuery {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query of `GET /login`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Credential operation forwarded to the credential backend.
///
/// Only ever holds the digest of the caller's password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialRequest {
    Signup {
        first_name: String,
        last_name: String,
        email: String,
        password: PasswordDigest,
    },
    Login {
        email: String,
        password: PasswordDigest,
    },
}

impl CredentialRequest {
    /// Validate a signup query and digest its password.
    pub fn signup(query: SignupQuery) -> Result<Self, ApiError> {
        let fields = [
            &query.first_name,
            &query.last_name,
            &query.email,
            &query.password,
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ApiError::invalid_input("All fields are required"));
        }

        Ok(Self::Signup {
            password: PasswordDigest::of(&query.password),
            first_name: query.first_name,
            last_name: query.last_name,
            email: query.email,
        })
    }

    /// Validate a login query and digest its password.
    pub fn login(query: LoginQuery) -> Result<Self, ApiError> {
        if query.email.is_empty() || query.password.is_empty() {
            return Err(ApiError::invalid_input("Email and password are required"));
        }

        Ok(Self::Login {
            password: PasswordDigest::of(&query.password),
            email: query.email,
        })
    }

    /// Operation name, also used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Signup { .. } => "signup",
            Self::Login { .. } => "login",
        }
    }

    /// Credential service path for this operation.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Signup { .. } => shared_types::SIGNUP_PATH,
            Self::Login { .. } => shared_types::LOGIN_PATH,
        }
    }

    /// JSON body sent to the credential service.
    pub fn to_payload(&self) -> CredentialPayload {
        match self {
            Self::Signup {
                first_name,
                last_name,
                email,
                password,
            } => CredentialPayload {
                first_name: Some(first_name.clone()),
                last_name: Some(last_name.clone()),
                email: email.clone(),
                password: password.as_hex().to_string(),
            },
            Self::Login { email, password } => CredentialPayload {
                first_name: None,
                last_name: None,
                email: email.clone(),
                password: password.as_hex().to_string(),
            },
        }
    }
}

/// Text rendering of a product, e.g. `Product: id:1 name:"Widget" price:9.99`.
pub struct ProductView<'a>(pub &'a Product);

impl fmt::Display for ProductView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product: id:{} name:{:?} price:{}",
            self.0.id, self.0.name, self.0.price
        )
    }
}
