//! Mock implementation of OfferRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::service_offer::{OfferStatus, ServiceOffer};
use crate::errors::DomainError;

use super::trait_::OfferRepository;

/// Mock offer repository for testing
#[derive(Default)]
pub struct MockOfferRepository {
    offers: Arc<RwLock<HashMap<Uuid, ServiceOffer>>>,
}

impl MockOfferRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with an existing offer
    pub async fn insert(&self, offer: ServiceOffer) {
        self.offers.write().await.insert(offer.id, offer);
    }
}

#[async_trait]
impl OfferRepository for MockOfferRepository {
    async fn create(&self, offer: ServiceOffer) -> Result<ServiceOffer, DomainError> {
        let mut offers = self.offers.write().await;
        offers.insert(offer.id, offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ServiceOffer>, DomainError> {
        let offers = self.offers.read().await;
        Ok(offers.get(&id).cloned())
    }

    async fn settle(
        &self,
        id: Uuid,
        status: OfferStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<ServiceOffer, DomainError> {
        let mut offers = self.offers.write().await;
        let offer = offers
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Offer"))?;

        if offer.status != OfferStatus::Pending {
            return Err(DomainError::conflict("Offer already settled"));
        }

        offer.status = status;
        offer.updated_at = updated_at;
        Ok(offer.clone())
    }

    async fn find_by_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ServiceOffer>, DomainError> {
        let offers = self.offers.read().await;
        let mut matching: Vec<ServiceOffer> = offers
            .values()
            .filter(|o| o.professional_id == professional_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<ServiceOffer>, DomainError> {
        let offers = self.offers.read().await;
        let mut matching: Vec<ServiceOffer> = offers
            .values()
            .filter(|o| o.client_id == client_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}
