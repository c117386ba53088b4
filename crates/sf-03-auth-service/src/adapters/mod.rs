//! In-memory user store.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{NewUser, StoreError, User};
use crate::ports::UserStore;

/// [`UserStore`] backed by a vector behind a read-write lock.
///
/// Ids are sequential from 1. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn exists(&self, email: &str) -> bool {
        self.users.read().iter().any(|user| user.email == email)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write();
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::AlreadyExists(user.email));
        }

        let user = User {
            id: users.len() as u64 + 1,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password: user.password,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_match(&self, email: &str, password: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|user| user.email == email && user.password == password)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: email.into(),
            password: "digest".into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let first = store.create(new_user("a@example.com")).await.unwrap();
        let second = store.create(new_user("b@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(store.exists("a@example.com").await);
        assert!(!store.exists("c@example.com").await);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        assert_eq!(
            store.create(new_user("a@example.com")).await,
            Err(StoreError::AlreadyExists("a@example.com".into()))
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_find_match_requires_both_fields() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();

        assert!(store.find_match("a@example.com", "digest").await.is_some());
        assert!(store.find_match("a@example.com", "other").await.is_none());
        assert!(store.find_match("b@example.com", "digest").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_single_winner() {
        let store = Arc::new(InMemoryUserStore::new());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(new_user("race@example.com")).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }
}
