//! PostgreSQL implementation of the DocumentRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::document::{Document, DocumentSlot, DocumentStatus};
use sg_core::errors::DomainError;
use sg_core::repositories::DocumentRepository;

use super::db_err;

const DOCUMENT_COLUMNS: &str =
    "id, user_id, slot, url, status, uploaded_at, reviewed_by, reviewed_at";

/// PostgreSQL implementation of DocumentRepository
pub struct PgDocumentRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgDocumentRepository {
    /// Create a new PostgreSQL document repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Document entity
    fn row_to_document(row: &PgRow) -> Result<Document, DomainError> {
        let slot_str: String = row
            .try_get("slot")
            .map_err(|e| db_err("Failed to get slot", e))?;
        let slot = DocumentSlot::parse(&slot_str).ok_or_else(|| DomainError::Database {
            message: format!("Unexpected slot value: {}", slot_str),
        })?;

        let status_str: String = row
            .try_get("status")
            .map_err(|e| db_err("Failed to get status", e))?;
        let status = DocumentStatus::parse(&status_str).ok_or_else(|| DomainError::Database {
            message: format!("Unexpected status value: {}", status_str),
        })?;

        Ok(Document {
            id: row
                .try_get("id")
                .map_err(|e| db_err("Failed to get id", e))?,
            user_id: row
                .try_get("user_id")
                .map_err(|e| db_err("Failed to get user_id", e))?,
            slot,
            url: row
                .try_get("url")
                .map_err(|e| db_err("Failed to get url", e))?,
            status,
            uploaded_at: row
                .try_get::<DateTime<Utc>, _>("uploaded_at")
                .map_err(|e| db_err("Failed to get uploaded_at", e))?,
            reviewed_by: row
                .try_get("reviewed_by")
                .map_err(|e| db_err("Failed to get reviewed_by", e))?,
            reviewed_at: row
                .try_get("reviewed_at")
                .map_err(|e| db_err("Failed to get reviewed_at", e))?,
        })
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, document: Document) -> Result<Document, DomainError> {
        let query = r#"
            INSERT INTO documents (
                id, user_id, slot, url, status, uploaded_at, reviewed_by, reviewed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#;

        sqlx::query(query)
            .bind(document.id)
            .bind(document.user_id)
            .bind(document.slot.as_str())
            .bind(&document.url)
            .bind(document.status.as_str())
            .bind(document.uploaded_at)
            .bind(document.reviewed_by)
            .bind(document.reviewed_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to insert document", e))?;

        Ok(document)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DomainError> {
        let query = format!(
            "SELECT {} FROM documents WHERE id = $1 LIMIT 1",
            DOCUMENT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Document>, DomainError> {
        let query = format!(
            "SELECT {} FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC",
            DOCUMENT_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn latest_for_slot(
        &self,
        user_id: Uuid,
        slot: DocumentSlot,
    ) -> Result<Option<Document>, DomainError> {
        let query = format!(
            "SELECT {} FROM documents WHERE user_id = $1 AND slot = $2 \
             ORDER BY uploaded_at DESC LIMIT 1",
            DOCUMENT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(user_id)
            .bind(slot.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to delete document", e))?;

        Ok(result.rows_affected() > 0)
    }
}
