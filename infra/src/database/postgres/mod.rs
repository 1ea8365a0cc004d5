//! PostgreSQL repository implementations

mod document_repository_impl;
mod offer_repository_impl;
mod outbox_repository_impl;
mod user_repository_impl;

pub use document_repository_impl::PgDocumentRepository;
pub use offer_repository_impl::PgOfferRepository;
pub use outbox_repository_impl::PgOutboxRepository;
pub use user_repository_impl::PgUserRepository;

use sg_core::errors::DomainError;

/// Map a SQLx error into the domain's database error
pub(crate) fn db_err(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("{}: {}", context, err),
    }
}
