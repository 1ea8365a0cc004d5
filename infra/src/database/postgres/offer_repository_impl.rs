//! PostgreSQL implementation of the OfferRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::service_offer::{OfferStatus, ServiceOffer};
use sg_core::errors::DomainError;
use sg_core::repositories::OfferRepository;

use super::db_err;

const OFFER_COLUMNS: &str = "id, service_id, professional_id, client_id, amount, \
     description, status, created_at, updated_at";

/// PostgreSQL implementation of OfferRepository
pub struct PgOfferRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgOfferRepository {
    /// Create a new PostgreSQL offer repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a ServiceOffer entity
    fn row_to_offer(row: &PgRow) -> Result<ServiceOffer, DomainError> {
        let status_str: String = row
            .try_get("status")
            .map_err(|e| db_err("Failed to get status", e))?;
        let status = OfferStatus::parse(&status_str).ok_or_else(|| DomainError::Database {
            message: format!("Unexpected status value: {}", status_str),
        })?;

        Ok(ServiceOffer {
            id: row
                .try_get("id")
                .map_err(|e| db_err("Failed to get id", e))?,
            service_id: row
                .try_get("service_id")
                .map_err(|e| db_err("Failed to get service_id", e))?,
            professional_id: row
                .try_get("professional_id")
                .map_err(|e| db_err("Failed to get professional_id", e))?,
            client_id: row
                .try_get("client_id")
                .map_err(|e| db_err("Failed to get client_id", e))?,
            amount: row
                .try_get::<Decimal, _>("amount")
                .map_err(|e| db_err("Failed to get amount", e))?,
            description: row
                .try_get("description")
                .map_err(|e| db_err("Failed to get description", e))?,
            status,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_err("Failed to get created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| db_err("Failed to get updated_at", e))?,
        })
    }

    async fn find_many(&self, column: &str, id: Uuid) -> Result<Vec<ServiceOffer>, DomainError> {
        let query = format!(
            "SELECT {} FROM service_offers WHERE {} = $1 ORDER BY created_at DESC",
            OFFER_COLUMNS, column
        );

        let rows = sqlx::query(&query)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        rows.iter().map(Self::row_to_offer).collect()
    }
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    async fn create(&self, offer: ServiceOffer) -> Result<ServiceOffer, DomainError> {
        let query = r#"
            INSERT INTO service_offers (
                id, service_id, professional_id, client_id, amount,
                description, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#;

        sqlx::query(query)
            .bind(offer.id)
            .bind(offer.service_id)
            .bind(offer.professional_id)
            .bind(offer.client_id)
            .bind(offer.amount)
            .bind(&offer.description)
            .bind(offer.status.as_str())
            .bind(offer.created_at)
            .bind(offer.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("Failed to create offer", e))?;

        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceOffer>, DomainError> {
        let query = format!(
            "SELECT {} FROM service_offers WHERE id = $1 LIMIT 1",
            OFFER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Database query failed", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_offer(&row)?)),
            None => Ok(None),
        }
    }

    async fn settle(
        &self,
        id: Uuid,
        status: OfferStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<ServiceOffer, DomainError> {
        // Guarded on the stored status still being pending, so two racing
        // settlements cannot both win.
        let query = format!(
            "UPDATE service_offers SET status = $2, updated_at = $3 \
             WHERE id = $1 AND status = 'pending' RETURNING {}",
            OFFER_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("Failed to settle offer", e))?;

        match result {
            Some(row) => Self::row_to_offer(&row),
            None => {
                let exists =
                    sqlx::query("SELECT EXISTS(SELECT 1 FROM service_offers WHERE id = $1) AS offer_exists")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await
                        .map_err(|e| db_err("Failed to check offer existence", e))?;
                let exists: bool = exists
                    .try_get("offer_exists")
                    .map_err(|e| db_err("Failed to get existence result", e))?;

                if exists {
                    Err(DomainError::conflict("Offer already settled"))
                } else {
                    Err(DomainError::not_found("Offer"))
                }
            }
        }
    }

    async fn find_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ServiceOffer>, DomainError> {
        self.find_many("professional_id", professional_id).await
    }

    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<ServiceOffer>, DomainError> {
        self.find_many("client_id", client_id).await
    }
}
