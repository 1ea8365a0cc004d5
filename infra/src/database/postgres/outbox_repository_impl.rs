//! PostgreSQL implementation of the OutboxRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::outbox::{NotificationKind, OutboxNotification};
use sg_core::errors::DomainError;
use sg_core::repositories::OutboxRepository;

use super::db_err;

/// PostgreSQL implementation of OutboxRepository
pub struct PgOutboxRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgOutboxRepository {
    /// Create a new PostgreSQL outbox repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to an OutboxNotification entity
    fn row_to_notification(row: &PgRow) -> Result<OutboxNotification, DomainError> {
        let kind_str: String = row
            .try_get("kind")
            .map_err(|e| db_err("Failed to get kind", e))?;
        let kind = NotificationKind::parse(&kind_str).ok_or_else(|| DomainError::Database {
            message: format!("Unexpected kind value: {}", kind_str),
        })?;

        Ok(OutboxNotification {
            id: row
                .try_get("id")
                .map_err(|e| db_err("Failed to get id", e))?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| db_err("Failed to get user_id", e))?,
            kind,
            payload: row
                .try_get("payload")
                .map_err(|e| db_err("Failed to get payload", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
            dispatched_at: row
                .try_get("dispatched_at")
                .map_err(|e| db_err("Failed to get dispatched_at", e))?,
        })
    }
}

#[async_trait]
impl OutboxRepository for PgOutboxRepository {
    async fn enqueue(
        &self,
        notification: OutboxNotification,
    ) -> Result<OutboxNotification, DomainError> {
        let query = r#"
            INSERT INTO notification_outbox (
                id, user_id, kind, payload, created_at, dispatched_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(notification.id)
            .bind(notification.user_id)
            .bind(notification.kind.as_str())
            .bind(&notification.payload)
            .bind(notification.created_at)
            .bind(notification.dispatched_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to enqueue notification", e))?;

        Ok(notification)
    }

    async fn pending_batch(&self, limit: i64) -> Result<Vec<OutboxNotification>, DomainError> {
        let query = r#"
            SELECT id, user_id, kind, payload, created_at, dispatched_at
            FROM notification_outbox
            WHERE dispatched_at IS NULL
            ORDER BY created_at ASC
            LIMIT $1
        "#;

        let rows = sqlx::query(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_notification).collect()
    }

    async fn mark_dispatched(&self, id: Uuid) -> Result<bool, DomainError> {
        let result =
            sqlx::query("UPDATE notification_outbox SET dispatched_at = $2 WHERE id = $1")
                .bind(id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(|e| db_err("Failed to mark notification dispatched", e))?;

        Ok(result.rows_affected() > 0)
    }
}
