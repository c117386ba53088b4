//! Credential exchange payloads.
//!
//! Field names are camelCase on the wire (`firstName`, `lastName`). Login
//! payloads omit the name fields entirely.

use serde::{Deserialize, Serialize};

/// Path of the signup operation on the credential service.
pub const SIGNUP_PATH: &str = "/signup";

/// Path of the login operation on the credential service.
pub const LOGIN_PATH: &str = "/login";

/// Request body for both credential operations.
///
/// Missing fields decode as empty strings so that a partially filled body is
/// still accepted by the credential service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    /// Already digested by the sender; never cleartext on this hop.
    #[serde(default)]
    pub password: String,
}

/// Verdict returned by the credential service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialResponse {
    pub success: bool,
    pub message: String,
}

impl CredentialResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
