//! DTOs for the offer endpoints

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sg_core::domain::entities::service_offer::{OfferStatus, ServiceOffer};

/// Body of the offer creation endpoint; the professional is the caller
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOfferRequest {
    /// Service request being answered
    pub service_id: Uuid,

    /// Client who owns the service request
    pub client_id: Uuid,

    /// Offered amount
    pub amount: Decimal,

    /// Free-text description of the offer
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
}

/// An offer as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferResponse {
    pub id: Uuid,
    pub service_id: Uuid,
    pub professional_id: Uuid,
    pub client_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceOffer> for OfferResponse {
    fn from(offer: ServiceOffer) -> Self {
        Self {
            id: offer.id,
            service_id: offer.service_id,
            professional_id: offer.professional_id,
            client_id: offer.client_id,
            amount: offer.amount,
            description: offer.description,
            status: offer.status,
            created_at: offer.created_at,
            updated_at: offer.updated_at,
        }
    }
}
