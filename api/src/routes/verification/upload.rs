use actix_web::{web, HttpResponse};

use sg_core::domain::entities::document::DocumentSlot;
use sg_core::repositories::{
    DocumentRepository, OfferRepository, OutboxRepository, UserRepository,
};
use sg_core::services::verification::DocumentStorage;
use sg_shared::types::{ApiResponse, ErrorResponse};

use crate::dto::verification::{DocumentResponse, UploadQuery};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/me/documents/{slot}?ext=jpg
///
/// Accepts the raw file bytes as the request body. On success the document
/// row is created in the pending state and the caller's matching slot URL
/// points at the stored file.
pub async fn upload_document<U, D, B, S, O>(
    state: web::Data<AppState<U, D, B, S, O>>,
    auth: AuthContext,
    path: web::Path<String>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> HttpResponse
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    B: OutboxRepository + 'static,
    S: DocumentStorage + 'static,
    O: OfferRepository + 'static,
{
    let slot_raw = path.into_inner();
    let slot = match DocumentSlot::parse(&slot_raw) {
        Some(slot) => slot,
        None => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "invalid_document_slot",
                format!(
                    "Unknown document slot '{}'; expected one of id_front, id_back, certification, other",
                    slot_raw
                ),
            ));
        }
    };

    match state
        .verification_service
        .upload_verification_document(auth.user_id, slot, &body, &query.ext)
        .await
    {
        Ok(document) => {
            HttpResponse::Created().json(ApiResponse::success(DocumentResponse::from(document)))
        }
        Err(error) => handle_domain_error(&error),
    }
}
