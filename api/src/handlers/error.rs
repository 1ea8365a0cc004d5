//! Domain-error to HTTP-response translation.
//!
//! Every verification service failure surfaces here: logged once at the
//! boundary, then mapped to a structured JSON error body. No retry is
//! attempted at this layer.

use actix_web::HttpResponse;

use sg_core::errors::{DomainError, OfferError, StorageError, VerificationError};
use sg_shared::types::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    tracing::error!(error = %error, "domain error at API boundary");

    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            format!("{} not found", resource),
        )),
        DomainError::Conflict { message } => {
            HttpResponse::Conflict().json(ErrorResponse::new("conflict", message))
        }
        DomainError::Unauthorized => HttpResponse::Unauthorized()
            .json(ErrorResponse::new("unauthorized", "Authentication required")),
        DomainError::Database { .. } | DomainError::Internal { .. } => HttpResponse::InternalServerError()
            .json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            )),
        DomainError::Verification(err) => handle_verification_error(err),
        DomainError::Offer(err) => handle_offer_error(err),
        DomainError::Storage(err) => handle_storage_error(err),
        DomainError::ValidationErr(err) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", err.to_string()))
        }
    }
}

fn handle_verification_error(error: &VerificationError) -> HttpResponse {
    match error {
        VerificationError::InvalidStatusTransition { .. } => {
            HttpResponse::Conflict().json(ErrorResponse::new(
                "invalid_status_transition",
                error.to_string(),
            ))
        }
        VerificationError::UnsupportedDocumentType { .. } => HttpResponse::BadRequest().json(
            ErrorResponse::new("unsupported_document_type", error.to_string()),
        ),
        VerificationError::DocumentTooLarge { .. } => HttpResponse::PayloadTooLarge()
            .json(ErrorResponse::new("document_too_large", error.to_string())),
        VerificationError::EmptyDocument => {
            HttpResponse::BadRequest().json(ErrorResponse::new("empty_document", error.to_string()))
        }
        VerificationError::UserNotVerified => {
            HttpResponse::Forbidden().json(ErrorResponse::new("user_not_verified", error.to_string()))
        }
    }
}

fn handle_offer_error(error: &OfferError) -> HttpResponse {
    match error {
        OfferError::AlreadySettled { .. } => {
            HttpResponse::Conflict().json(ErrorResponse::new("offer_already_settled", error.to_string()))
        }
        OfferError::AmountNotPositive => {
            HttpResponse::BadRequest().json(ErrorResponse::new("invalid_amount", error.to_string()))
        }
        OfferError::NotOfferOwner => {
            HttpResponse::Forbidden().json(ErrorResponse::new("not_offer_owner", error.to_string()))
        }
    }
}

fn handle_storage_error(error: &StorageError) -> HttpResponse {
    // The blob store is an upstream dependency of this API
    HttpResponse::BadGateway().json(ErrorResponse::new("storage_unavailable", error.to_string()))
}

/// Response for authenticated users lacking the admin role
pub fn forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ErrorResponse::new(
        "forbidden",
        "Admin privileges required",
    ))
}
