//! Document repository trait for verification document persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::document::{Document, DocumentSlot};
use crate::errors::DomainError;

/// Repository trait for Document entity persistence operations
///
/// Document rows are append-mostly: uploads insert, the compensation path
/// of a failed upload deletes, and review mutates the status fields.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a freshly uploaded document
    async fn insert(&self, document: Document) -> Result<Document, DomainError>;

    /// Find a document by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DomainError>;

    /// All documents for a user, newest upload first
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Document>, DomainError>;

    /// The most recent document for a (user, slot) pair, if any
    async fn latest_for_slot(
        &self,
        user_id: Uuid,
        slot: DocumentSlot,
    ) -> Result<Option<Document>, DomainError>;

    /// Delete a document row (upload compensation path)
    ///
    /// # Returns
    /// * `Ok(true)` - Document was deleted
    /// * `Ok(false)` - Document not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
