use actix_web::{web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::{ApiResponse, ErrorResponse};

use crate::dto::verification::{RejectUserRequest, UserResponse};
use crate::handlers::error::{forbidden, handle_domain_error};
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/admin/users/{id}/approve
///
/// Approves the account. The reviewer recorded on the row is the
/// authenticated admin. Re-approving a verified account succeeds and
/// returns the current row unchanged.
pub async fn approve_user<U, D, B, S, O>(
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
        .approve_user(path.into_inner(), auth.user_id)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/admin/users/{id}/reject
///
/// Rejects the account with an optional reason; a missing or blank reason
/// is stored as the default rejection text.
pub async fn reject_user<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<RejectUserRequest>,
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

    if let Err(validation_errors) = request.0.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            validation_errors.to_string(),
        ));
    }

    match state
        .verification_service
        .reject_user(path.into_inner(), auth.user_id, request.0.reason)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/admin/users/{id}/ban
pub async fn ban_user<U, D, B, S, O>(
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
        .ban_user(path.into_inner(), auth.user_id)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/admin/users/{id}/review
///
/// Marks a pending account as under review so other admins see it claimed.
pub async fn begin_review<U, D, B, S, O>(
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
        .begin_review(path.into_inner(), auth.user_id)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))),
        Err(error) => handle_domain_error(&error),
    }
}
