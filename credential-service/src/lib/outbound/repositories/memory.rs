use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRegistry;
use crate::user::errors::CredentialError;

/// Process-local registry keyed by email.
///
/// Uniqueness is decided under the write lock, so of two concurrent inserts
/// for one email exactly one succeeds. Ids start at 1.
#[derive(Default)]
pub struct InMemoryUserRegistry {
    users: RwLock<HashMap<EmailAddress, User>>,
}

impl InMemoryUserRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRegistry for InMemoryUserRegistry {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, CredentialError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserId, CredentialError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.email) {
            return Err(CredentialError::EmailAlreadyExists(user.email.to_string()));
        }

        let id = UserId(users.len() as i64 + 1);
        users.insert(
            user.email.clone(),
            User {
                id,
                email: user.email,
                password_hash: user.password_hash,
            },
        );

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let registry = InMemoryUserRegistry::new();

        let first = registry.create(new_user("a@b.com")).await.unwrap();
        let second = registry.create(new_user("c@d.com")).await.unwrap();
        assert_eq!(first, UserId(1));
        assert_eq!(second, UserId(2));

        let email = EmailAddress::new("a@b.com".to_string()).unwrap();
        let found = registry.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.id, first);
        assert_eq!(found.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let registry = InMemoryUserRegistry::new();
        let email = EmailAddress::new("a@b.com".to_string()).unwrap();

        assert!(registry.find_by_email(&email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let registry = InMemoryUserRegistry::new();

        registry.create(new_user("a@b.com")).await.unwrap();
        let result = registry.create(new_user("a@b.com")).await;

        assert!(matches!(result, Err(CredentialError::EmailAlreadyExists(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_single_winner() {
        let registry = Arc::new(InMemoryUserRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.create(new_user("a@b.com")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
    }
}
