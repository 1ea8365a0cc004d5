//! Repository interfaces for data persistence.
//!
//! Each repository module pairs an async trait with an in-memory mock used
//! as a test double across the workspace.

pub mod document;
pub mod offer;
pub mod outbox;
pub mod user;

pub use document::{DocumentRepository, MockDocumentRepository};
pub use offer::{MockOfferRepository, OfferRepository};
pub use outbox::{MockOutboxRepository, OutboxRepository};
pub use user::{MockUserRepository, UserRepository};
