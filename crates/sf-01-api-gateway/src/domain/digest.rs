//! One-way password digest applied before credentials leave the gateway.
//!
//! Lowercase hex SHA-256, unsalted. This only keeps cleartext off the
//! backend hop; it is not a storage scheme.

use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA-256 of a password (always 64 characters).
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Length of the hex encoding
    pub const HEX_LEN: usize = 64;

    pub fn of(password: &str) -> Self {
        Self(hex::encode(Sha256::digest(password.as_bytes())))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

// Keep digests out of logs even at debug level.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}
