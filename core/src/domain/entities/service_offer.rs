//! Service offer entity: a professional's priced bid on a client's service
//! request.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::OfferError;

/// Lifecycle state of an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Awaiting the client's decision
    #[default]
    Pending,
    /// Terminal: accepted by the client
    Accepted,
    /// Terminal: rejected by the client
    Rejected,
    /// Terminal: withdrawn by the professional
    Cancelled,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OfferStatus::Pending),
            "accepted" => Some(OfferStatus::Accepted),
            "rejected" => Some(OfferStatus::Rejected),
            "cancelled" => Some(OfferStatus::Cancelled),
            _ => None,
        }
    }
}

/// An offer made by a professional on a service request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffer {
    /// Unique identifier
    pub id: Uuid,

    /// The service request this offer answers
    pub service_id: Uuid,

    /// Professional making the offer
    pub professional_id: Uuid,

    /// Client who owns the service request
    pub client_id: Uuid,

    /// Offered amount
    pub amount: Decimal,

    /// Free-text description of the offer
    pub description: String,

    /// Lifecycle state
    pub status: OfferStatus,

    /// Timestamp when the offer was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the offer was last updated
    pub updated_at: DateTime<Utc>,
}

impl ServiceOffer {
    /// Creates a new pending offer
    pub fn new(
        service_id: Uuid,
        professional_id: Uuid,
        client_id: Uuid,
        amount: Decimal,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            service_id,
            professional_id,
            client_id,
            amount,
            description,
            status: OfferStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Client accepts the offer
    pub fn accept(&mut self) -> Result<(), OfferError> {
        self.transition(OfferStatus::Accepted)
    }

    /// Client rejects the offer
    pub fn reject(&mut self) -> Result<(), OfferError> {
        self.transition(OfferStatus::Rejected)
    }

    /// Professional withdraws the offer
    pub fn cancel(&mut self) -> Result<(), OfferError> {
        self.transition(OfferStatus::Cancelled)
    }

    fn transition(&mut self, to: OfferStatus) -> Result<(), OfferError> {
        if self.status != OfferStatus::Pending {
            return Err(OfferError::AlreadySettled {
                status: self.status.as_str().to_string(),
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn offer() -> ServiceOffer {
        ServiceOffer::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::from_f64(1500.0).unwrap(),
            "Instalación completa".to_string(),
        )
    }

    #[test]
    fn test_new_offer_is_pending() {
        assert_eq!(offer().status, OfferStatus::Pending);
    }

    #[test]
    fn test_accept_then_cancel_fails() {
        let mut o = offer();
        o.accept().unwrap();
        assert_eq!(o.status, OfferStatus::Accepted);

        let err = o.cancel().unwrap_err();
        assert!(matches!(err, OfferError::AlreadySettled { .. }));
    }

    #[test]
    fn test_cancel_pending() {
        let mut o = offer();
        o.cancel().unwrap();
        assert_eq!(o.status, OfferStatus::Cancelled);
    }
}
