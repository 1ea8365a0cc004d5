//! Offer repository trait for service-offer persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::service_offer::{OfferStatus, ServiceOffer};
use crate::errors::DomainError;

/// Repository trait for ServiceOffer entity persistence operations
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Create a new offer
    async fn create(&self, offer: ServiceOffer) -> Result<ServiceOffer, DomainError>;

    /// Find an offer by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceOffer>, DomainError>;

    /// Settle a pending offer into a terminal status.
    ///
    /// The write is guarded on the stored status still being `pending`,
    /// making concurrent settlements race-safe: the loser fails with
    /// `Conflict`, a missing row fails with `NotFound`.
    async fn settle(
        &self,
        id: Uuid,
        status: OfferStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<ServiceOffer, DomainError>;

    /// All offers made by a professional, newest first
    async fn find_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ServiceOffer>, DomainError>;

    /// All offers addressed to a client, newest first
    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<ServiceOffer>, DomainError>;
}
