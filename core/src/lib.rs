//! # ServiGo Core
//!
//! Core business logic and domain layer for the ServiGo backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Document, DocumentSlot, DocumentStatus, NotificationKind, OfferStatus, OutboxNotification,
    ServiceOffer, User, UserType, VerificationStatus, DEFAULT_REJECTION_REASON,
};
pub use errors::{
    DomainError, DomainResult, OfferError, StorageError, ValidationError, VerificationError,
};
pub use repositories::{
    DocumentRepository, MockDocumentRepository, MockOfferRepository, MockOutboxRepository,
    MockUserRepository, OfferRepository, OutboxRepository, UserRepository,
};
pub use services::{
    DocumentStorage, GateDecision, OfferService, VerificationService, VerificationServiceConfig,
};
