//! PostgreSQL implementation of the UserRepository trait.
//!
//! All row decoding goes through an explicit mapping function so that
//! unexpected column values fail loudly at the store boundary instead of
//! leaking dynamically shaped rows into the domain.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::user::{User, UserType, VerificationStatus};
use sg_core::errors::DomainError;
use sg_core::repositories::UserRepository;

use super::db_err;

const USER_COLUMNS: &str = r#"
    id, email, full_name, phone, user_type, verification_status,
    is_active, rejection_reason,
    id_front_url, id_back_url, certification_url, other_url,
    reviewed_by, reviewed_at, created_at, updated_at
"#;

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PostgreSQL user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        let user_type_str: String = row
            .try_get("user_type")
            .map_err(|e| db_err("Failed to get user_type", e))?;
        let user_type = UserType::parse(&user_type_str).ok_or_else(|| DomainError::Database {
            message: format!("Unexpected user_type value: {}", user_type_str),
        })?;

        let status_str: String = row
            .try_get("verification_status")
            .map_err(|e| db_err("Failed to get verification_status", e))?;
        let verification_status =
            VerificationStatus::parse(&status_str).ok_or_else(|| DomainError::Database {
                message: format!("Unexpected verification_status value: {}", status_str),
            })?;

        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| db_err("Failed to get id", e))?,
            email: row
                .try_get("email")
                .map_err(|e| db_err("Failed to get email", e))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| db_err("Failed to get full_name", e))?,
            phone: row
                .try_get("phone")
                .map_err(|e| db_err("Failed to get phone", e))?,
            user_type,
            verification_status,
            is_active: row
                .try_get("is_active")
                .map_err(|e| db_err("Failed to get is_active", e))?,
            rejection_reason: row
                .try_get("rejection_reason")
                .map_err(|e| db_err("Failed to get rejection_reason", e))?,
            id_front_url: row
                .try_get("id_front_url")
                .map_err(|e| db_err("Failed to get id_front_url", e))?,
            id_back_url: row
                .try_get("id_back_url")
                .map_err(|e| db_err("Failed to get id_back_url", e))?,
            certification_url: row
                .try_get("certification_url")
                .map_err(|e| db_err("Failed to get certification_url", e))?,
            other_url: row
                .try_get("other_url")
                .map_err(|e| db_err("Failed to get other_url", e))?,
            reviewed_by: row
                .try_get("reviewed_by")
                .map_err(|e| db_err("Failed to get reviewed_by", e))?,
            reviewed_at: row
                .try_get("reviewed_at")
                .map_err(|e| db_err("Failed to get reviewed_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_err("Failed to get updated_at", e))?,
        })
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1) AS user_exists")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_err("Failed to check user existence", e))?;

        row.try_get("user_exists")
            .map_err(|e| db_err("Failed to get existence result", e))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE id = $1 LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE email = $1 LIMIT 1",
            USER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        let query = r#"
            INSERT INTO users (
                id, email, full_name, phone, user_type, verification_status,
                is_active, rejection_reason,
                id_front_url, id_back_url, certification_url, other_url,
                reviewed_by, reviewed_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        "#;

        sqlx::query(query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.phone)
            .bind(user.user_type.as_str())
            .bind(user.verification_status.as_str())
            .bind(user.is_active)
            .bind(&user.rejection_reason)
            .bind(&user.id_front_url)
            .bind(&user.id_back_url)
            .bind(&user.certification_url)
            .bind(&user.other_url)
            .bind(user.reviewed_by)
            .bind(user.reviewed_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to create user", e))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = $2,
                full_name = $3,
                phone = $4,
                user_type = $5,
                verification_status = $6,
                is_active = $7,
                rejection_reason = $8,
                id_front_url = $9,
                id_back_url = $10,
                certification_url = $11,
                other_url = $12,
                reviewed_by = $13,
                reviewed_at = $14,
                updated_at = $15
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.phone)
            .bind(user.user_type.as_str())
            .bind(user.verification_status.as_str())
            .bind(user.is_active)
            .bind(&user.rejection_reason)
            .bind(&user.id_front_url)
            .bind(&user.id_back_url)
            .bind(&user.certification_url)
            .bind(&user.other_url)
            .bind(user.reviewed_by)
            .bind(user.reviewed_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn update_with_version(
        &self,
        user: User,
        expected_updated_at: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        // The optimistic-concurrency guard: the write only lands while the
        // row still carries the updated_at we read. The approval transition
        // is thereby a single atomic statement on the server side.
        let query = r#"
            UPDATE users SET
                verification_status = $3,
                is_active = $4,
                rejection_reason = $5,
                reviewed_by = $6,
                reviewed_at = $7,
                updated_at = $8
            WHERE id = $1 AND updated_at = $2
        "#;

        let result = sqlx::query(query)
            .bind(user.id)
            .bind(expected_updated_at)
            .bind(user.verification_status.as_str())
            .bind(user.is_active)
            .bind(&user.rejection_reason)
            .bind(user.reviewed_by)
            .bind(user.reviewed_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to update user status", e))?;

        if result.rows_affected() == 0 {
            if self.exists(user.id).await? {
                return Err(DomainError::conflict("User was modified concurrently"));
            }
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn find_by_status(
        &self,
        status: VerificationStatus,
    ) -> Result<Vec<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE verification_status = $1 ORDER BY created_at ASC",
            USER_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_user).collect()
    }
}
