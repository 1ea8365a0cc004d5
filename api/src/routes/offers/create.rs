use actix_web::{web, HttpResponse};
use validator::Validate;

use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::{ApiResponse, ErrorResponse};

use crate::dto::offer::{CreateOfferRequest, OfferResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/offers
///
/// Creates a pending offer on a service request. The professional is the
/// authenticated caller and must be verified.
pub async fn create_offer<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    request: web::Json<CreateOfferRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    if let Err(validation_errors) = request.0.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            validation_errors.to_string(),
        ));
    }

    let request = request.into_inner();
    match state
        .offer_service
        .create_offer(
            request.service_id,
            auth.user_id,
            request.client_id,
            request.amount,
            request.description,
        )
        .await
    {
        Ok(offer) => HttpResponse::Created().json(ApiResponse::success(OfferResponse::from(offer))),
        Err(error) => handle_domain_error(&error),
    }
}
