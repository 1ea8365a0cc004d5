use actix_web::{web, HttpResponse};

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::ApiResponse;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/me/verification
///
/// The mobile gate read: the client renders the blocking pending-approval
/// screen unless `access_granted` is true. This is a pure read; the client
/// refreshes manually.
pub async fn verification_gate<U, D, B, S, O>(
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
        .verification_service
        .verification_gate(auth.user_id)
        .await
    {
        Ok(decision) => HttpResponse::Ok().json(ApiResponse::success(decision)),
        Err(error) => handle_domain_error(&error),
    }
}
