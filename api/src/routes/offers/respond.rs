use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::ApiResponse;

use crate::dto::offer::OfferResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/offers/{id}/accept
pub async fn accept_offer<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    respond(state, auth, path.into_inner(), true).await
}

/// Handler for POST /api/v1/offers/{id}/reject
pub async fn reject_offer<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    respond(state, auth, path.into_inner(), false).await
}

/// Handler for POST /api/v1/offers/{id}/cancel
///
/// Withdraws the caller's own pending offer.
pub async fn cancel_offer<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
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
        .cancel_offer(path.into_inner(), auth.user_id)
        .await
    {
        Ok(offer) => HttpResponse::Ok().json(ApiResponse::success(OfferResponse::from(offer))),
        Err(error) => handle_domain_error(&error),
    }
}

async fn respond<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    offer_id: Uuid,
    accept: bool,
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
        .respond_to_offer(offer_id, auth.user_id, accept)
        .await
    {
        Ok(offer) => HttpResponse::Ok().json(ApiResponse::success(OfferResponse::from(offer))),
        Err(error) => handle_domain_error(&error),
    }
}
