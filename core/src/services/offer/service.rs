//! Offer service implementation

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::outbox::{NotificationKind, OutboxNotification};
use crate::domain::entities::service_offer::{OfferStatus, ServiceOffer};
use crate::errors::{DomainError, DomainResult, OfferError, ValidationError, VerificationError};
use crate::repositories::{OfferRepository, OutboxRepository, UserRepository};

/// Offer service mediating offer creation and settlement
pub struct OfferService<O, U, B>
where
    O: OfferRepository,
    U: UserRepository,
    B: OutboxRepository,
{
    offer_repository: Arc<O>,
    user_repository: Arc<U>,
    outbox_repository: Arc<B>,
}

impl<O, U, B> OfferService<O, U, B>
where
    O: OfferRepository,
    U: UserRepository,
    B: OutboxRepository,
{
    /// Create a new offer service
    pub fn new(
        offer_repository: Arc<O>,
        user_repository: Arc<U>,
        outbox_repository: Arc<B>,
    ) -> Self {
        Self {
            offer_repository,
            user_repository,
            outbox_repository,
        }
    }

    /// Create a pending offer on a service request.
    ///
    /// Only verified professionals may make offers; the verification gate the
    /// mobile app renders is enforced again here since the HTTP surface is
    /// reachable without it.
    pub async fn create_offer(
        &self,
        service_id: Uuid,
        professional_id: Uuid,
        client_id: Uuid,
        amount: Decimal,
        description: String,
    ) -> DomainResult<ServiceOffer> {
        let professional = self
            .user_repository
            .find_by_id(professional_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if !professional.is_verified() {
            return Err(VerificationError::UserNotVerified.into());
        }
        if amount <= Decimal::ZERO {
            return Err(OfferError::AmountNotPositive.into());
        }
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "description".to_string(),
            }
            .into());
        }

        let offer = ServiceOffer::new(service_id, professional_id, client_id, amount, description);
        let offer = self.offer_repository.create(offer).await?;

        self.notify(client_id, NotificationKind::OfferReceived, &offer)
            .await;
        info!(offer_id = %offer.id, professional_id = %professional_id, "offer created");
        Ok(offer)
    }

    /// Client accepts or rejects a pending offer
    pub async fn respond_to_offer(
        &self,
        offer_id: Uuid,
        client_id: Uuid,
        accept: bool,
    ) -> DomainResult<ServiceOffer> {
        let mut offer = self
            .offer_repository
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))?;

        if offer.client_id != client_id {
            return Err(OfferError::NotOfferOwner.into());
        }

        if accept {
            offer.accept()?;
        } else {
            offer.reject()?;
        }

        let offer = self
            .offer_repository
            .settle(offer.id, offer.status, Utc::now())
            .await?;

        let kind = if accept {
            NotificationKind::OfferAccepted
        } else {
            NotificationKind::OfferRejected
        };
        self.notify(offer.professional_id, kind, &offer).await;
        Ok(offer)
    }

    /// Professional withdraws their own pending offer
    pub async fn cancel_offer(
        &self,
        offer_id: Uuid,
        professional_id: Uuid,
    ) -> DomainResult<ServiceOffer> {
        let mut offer = self
            .offer_repository
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))?;

        if offer.professional_id != professional_id {
            return Err(OfferError::NotOfferOwner.into());
        }

        offer.cancel()?;
        self.offer_repository
            .settle(offer.id, OfferStatus::Cancelled, Utc::now())
            .await
    }

    /// All offers made by a professional, newest first
    pub async fn offers_for_professional(
        &self,
        professional_id: Uuid,
    ) -> DomainResult<Vec<ServiceOffer>> {
        self.offer_repository
            .find_by_professional(professional_id)
            .await
    }

    /// All offers addressed to a client, newest first
    pub async fn offers_for_client(&self, client_id: Uuid) -> DomainResult<Vec<ServiceOffer>> {
        self.offer_repository.find_by_client(client_id).await
    }

    async fn notify(&self, recipient: Uuid, kind: NotificationKind, offer: &ServiceOffer) {
        let payload = serde_json::json!({
            "offer_id": offer.id,
            "service_id": offer.service_id,
            "amount": offer.amount,
            "status": offer.status.as_str(),
        });
        let notification = OutboxNotification::new(recipient, kind, payload);
        if let Err(err) = self.outbox_repository.enqueue(notification).await {
            warn!(offer_id = %offer.id, error = %err, "failed to enqueue offer notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::{User, UserType};
    use crate::repositories::{MockOfferRepository, MockOutboxRepository, MockUserRepository};
    use rust_decimal::prelude::FromPrimitive;

    fn service() -> (
        OfferService<MockOfferRepository, MockUserRepository, MockOutboxRepository>,
        Arc<MockUserRepository>,
        Arc<MockOutboxRepository>,
    ) {
        let offers = Arc::new(MockOfferRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let outbox = Arc::new(MockOutboxRepository::new());
        (
            OfferService::new(offers, users.clone(), outbox.clone()),
            users,
            outbox,
        )
    }

    async fn verified_professional(users: &MockUserRepository) -> User {
        let mut user = User::new(
            "pro@example.com".to_string(),
            "Pro".to_string(),
            UserType::Professional,
        );
        user.approve(Uuid::new_v4()).unwrap();
        users.insert(user.clone()).await;
        user
    }

    #[tokio::test]
    async fn test_unverified_professional_cannot_offer() {
        let (service, users, _) = service();
        let user = User::new(
            "new@example.com".to_string(),
            "New".to_string(),
            UserType::Professional,
        );
        users.insert(user.clone()).await;

        let err = service
            .create_offer(
                Uuid::new_v4(),
                user.id,
                Uuid::new_v4(),
                Decimal::from_f64(100.0).unwrap(),
                "Pintura".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::UserNotVerified)
        ));
    }

    #[tokio::test]
    async fn test_create_offer_notifies_client() {
        let (service, users, outbox) = service();
        let pro = verified_professional(&users).await;
        let client_id = Uuid::new_v4();

        let offer = service
            .create_offer(
                Uuid::new_v4(),
                pro.id,
                client_id,
                Decimal::from_f64(250.0).unwrap(),
                "Reparación de tuberías".to_string(),
            )
            .await
            .unwrap();
        assert_eq!(offer.status, OfferStatus::Pending);

        let staged = outbox.staged_of_kind(NotificationKind::OfferReceived).await;
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].user_id, client_id);
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let (service, users, _) = service();
        let pro = verified_professional(&users).await;

        let err = service
            .create_offer(
                Uuid::new_v4(),
                pro.id,
                Uuid::new_v4(),
                Decimal::ZERO,
                "Gratis".to_string(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Offer(OfferError::AmountNotPositive)
        ));
    }

    #[tokio::test]
    async fn test_only_the_client_can_respond() {
        let (service, users, _) = service();
        let pro = verified_professional(&users).await;
        let client_id = Uuid::new_v4();

        let offer = service
            .create_offer(
                Uuid::new_v4(),
                pro.id,
                client_id,
                Decimal::from_f64(80.0).unwrap(),
                "Limpieza".to_string(),
            )
            .await
            .unwrap();

        let err = service
            .respond_to_offer(offer.id, Uuid::new_v4(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Offer(OfferError::NotOfferOwner)));
    }

    #[tokio::test]
    async fn test_accept_settles_and_notifies_professional() {
        let (service, users, outbox) = service();
        let pro = verified_professional(&users).await;
        let client_id = Uuid::new_v4();

        let offer = service
            .create_offer(
                Uuid::new_v4(),
                pro.id,
                client_id,
                Decimal::from_f64(80.0).unwrap(),
                "Limpieza".to_string(),
            )
            .await
            .unwrap();

        let settled = service
            .respond_to_offer(offer.id, client_id, true)
            .await
            .unwrap();
        assert_eq!(settled.status, OfferStatus::Accepted);

        let staged = outbox.staged_of_kind(NotificationKind::OfferAccepted).await;
        assert_eq!(staged.len(), 1);
        assert_eq!(staged[0].user_id, pro.id);

        // A settled offer cannot be settled again
        let err = service
            .respond_to_offer(offer.id, client_id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Offer(OfferError::AlreadySettled { .. })));
    }

    #[tokio::test]
    async fn test_cancel_requires_owning_professional() {
        let (service, users, _) = service();
        let pro = verified_professional(&users).await;
        let offer = service
            .create_offer(
                Uuid::new_v4(),
                pro.id,
                Uuid::new_v4(),
                Decimal::from_f64(40.0).unwrap(),
                "Jardinería".to_string(),
            )
            .await
            .unwrap();

        let err = service
            .cancel_offer(offer.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Offer(OfferError::NotOfferOwner)));

        let cancelled = service.cancel_offer(offer.id, pro.id).await.unwrap();
        assert_eq!(cancelled.status, OfferStatus::Cancelled);
    }
}
