//! Domain-specific error types and error handling.

use thiserror::Error;

/// Verification workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Unsupported document type: .{ext}")]
    UnsupportedDocumentType { ext: String },

    #[error("Document too large: {size} bytes (max {max})")]
    DocumentTooLarge { size: usize, max: usize },

    #[error("Document is empty")]
    EmptyDocument,

    #[error("User is not verified")]
    UserNotVerified,
}

/// Offer workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OfferError {
    #[error("Offer already settled as {status}")]
    AlreadySettled { status: String },

    #[error("Offer amount must be positive")]
    AmountNotPositive,

    #[error("Actor does not own this offer")]
    NotOfferOwner,
}

/// Object-store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Storage configuration error: {0}")]
    Config(String),
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Business rule violation: {rule}")]
    BusinessRuleViolation { rule: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Offer(#[from] OfferError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Not-found error for a named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Conflict error (e.g. a lost optimistic-concurrency race)
    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_bridging() {
        let err: DomainError = VerificationError::UserNotVerified.into();
        assert_eq!(err.to_string(), "User is not verified");
    }

    #[test]
    fn test_transition_error_message() {
        let err = VerificationError::InvalidStatusTransition {
            from: "rejected".to_string(),
            to: "verified".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid status transition: rejected -> verified"
        );
    }
}
