//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and uses Result types for proper error handling.
//! Implementations handle the actual database operations while maintaining
//! the abstraction boundary between domain and infrastructure layers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::{User, VerificationStatus};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// Fails with a validation error when the email is already registered.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user unconditionally.
    ///
    /// Used for fields that do not race across reviewers, such as the
    /// per-slot document URLs. Fails with `NotFound` when the row is gone.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user guarded by an optimistic-concurrency check.
    ///
    /// The write only applies while the stored `updated_at` still equals
    /// `expected_updated_at`. A concurrent writer that got there first makes
    /// this fail with `Conflict`; a missing row fails with `NotFound`.
    async fn update_with_version(
        &self,
        user: User,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<User, DomainError>;

    /// List users in the given verification state, oldest first.
    ///
    /// The pending queue is reviewed FIFO, so ordering by `created_at`
    /// ascending is part of the contract.
    async fn find_by_status(
        &self,
        status: VerificationStatus,
    ) -> Result<Vec<User>, DomainError>;
}
