use actix_web::{web, HttpResponse};

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::ApiResponse;

use crate::dto::offer::OfferResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/offers/sent
///
/// Offers the authenticated professional has made, newest first.
pub async fn sent_offers<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    match state
        .offer_service
        .offers_for_professional(auth.user_id)
        .await
    {
        Ok(offers) => {
            let offers: Vec<OfferResponse> = offers.into_iter().map(OfferResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(offers))
        }
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/offers/received
///
/// Offers addressed to the authenticated client, newest first.
pub async fn received_offers<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    match state.offer_service.offers_for_client(auth.user_id).await {
        Ok(offers) => {
            let offers: Vec<OfferResponse> = offers.into_iter().map(OfferResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(offers))
        }
        Err(error) => handle_domain_error(&error),
    }
}
