//! Outbound ports for the auth service.

use async_trait::async_trait;

use crate::domain::{NewUser, StoreError, User};

/// User persistence (Driven Port)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether a user with this email is registered.
    async fn exists(&self, email: &str) -> bool;

    /// Register a user, assigning the next id.
    ///
    /// The existence check and the insert are one atomic step: two concurrent
    /// signups for the same email yield exactly one success.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// The user whose email and password both match.
    async fn find_match(&self, email: &str, password: &str) -> Option<User>;
}
