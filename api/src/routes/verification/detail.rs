use actix_web::{web, HttpResponse};
use uuid::Uuid;

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::ApiResponse;

use crate::dto::verification::{DocumentResponse, UserResponse};
use crate::handlers::error::{forbidden, handle_domain_error};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/admin/users/{id}
pub async fn get_user<U, D, B, S, O>(
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
    if !auth.is_admin() {
        return forbidden();
    }

    match state.verification_service.user_by_id(path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/admin/users/{id}/documents
///
/// Lists every document the user has uploaded, newest first, for the
/// review detail screen.
pub async fn get_user_documents<U, D, B, S, O>(
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
    if !auth.is_admin() {
        return forbidden();
    }

    match state
        .verification_service
        .user_documents(path.into_inner())
        .await
    {
        Ok(documents) => {
            let documents: Vec<DocumentResponse> =
                documents.into_iter().map(DocumentResponse::from).collect();
            HttpResponse::Ok().json(ApiResponse::success(documents))
        }
        Err(error) => handle_domain_error(&error),
    }
}
