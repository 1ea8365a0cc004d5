//! Route handlers and shared application state.

pub mod offers;
pub mod verification;

use std::sync::Arc;

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_core::services::{OfferService, VerificationService};
use sg_shared::config::AuthConfig;

/// Application state that holds shared services
pub struct AppState<U, D, B, S, O>
where
    U: UserRepository,
    D: DocumentRepository,
    B: OutboxRepository,
    S: DocumentStorage,
    O: OfferRepository,
{
    pub verification_service: Arc<VerificationService<U, D, B, S>>,
    pub offer_service: Arc<OfferService<O, U, B>>,
    pub auth: AuthConfig,
}
