use actix_web::{web, HttpResponse};

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::ApiResponse;

use crate::dto::verification::UserResponse;
use crate::handlers::error::{forbidden, handle_domain_error};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/admin/verifications/pending
///
/// Returns the FIFO review queue: every user awaiting verification,
/// oldest registration first.
pub async fn pending_users<U, D, B, S, O>(
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
    if !auth.is_admin() {
        return forbidden();
    }

    match state.verification_service.pending_users().await {
        Ok(users) => {
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(users))
        }
        Err(error) => handle_domain_error(&error),
    }
}
