//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{User, VerificationStatus};
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail_updates: Arc<RwLock<bool>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Make every subsequent update fail, to exercise compensation paths
    pub async fn fail_next_updates(&self, fail: bool) {
        *self.fail_updates.write().await = fail;
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        if *self.fail_updates.read().await {
            return Err(DomainError::Database {
                message: "injected update failure".to_string(),
            });
        }

        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(DomainError::not_found("User"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_with_version(
        &self,
        user: User,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        if *self.fail_updates.read().await {
            return Err(DomainError::Database {
                message: "injected update failure".to_string(),
            });
        }

        let mut users = self.users.write().await;
        let current = users
            .get(&user.id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        if current.updated_at != expected_updated_at {
            return Err(DomainError::conflict("User was modified concurrently"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_status(
        &self,
        status: VerificationStatus,
    ) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| u.verification_status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|u| u.created_at);
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::UserType;

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = MockUserRepository::new();
        let user = User::new(
            "dup@example.com".to_string(),
            "A".to_string(),
            UserType::Client,
        );
        repo.create(user.clone()).await.unwrap();

        let again = User::new(
            "dup@example.com".to_string(),
            "B".to_string(),
            UserType::Client,
        );
        assert!(repo.create(again).await.is_err());
    }

    #[tokio::test]
    async fn test_update_with_version_detects_race() {
        let repo = MockUserRepository::new();
        let user = User::new(
            "x@example.com".to_string(),
            "X".to_string(),
            UserType::Professional,
        );
        let stored = repo.create(user).await.unwrap();

        let stale = stored.updated_at - chrono::Duration::seconds(5);
        let err = repo
            .update_with_version(stored, stale)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_find_by_status_is_fifo() {
        let repo = MockUserRepository::new();
        let mut first = User::new("a@e.com".to_string(), "A".to_string(), UserType::Client);
        first.created_at = Utc::now() - chrono::Duration::minutes(10);
        let second = User::new("b@e.com".to_string(), "B".to_string(), UserType::Client);
        repo.insert(second).await;
        repo.insert(first.clone()).await;

        let pending = repo
            .find_by_status(VerificationStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, first.id);
    }
}
