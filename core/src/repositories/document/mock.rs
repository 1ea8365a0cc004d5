//! Mock implementation of DocumentRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::document::{Document, DocumentSlot};
use crate::errors::DomainError;

use super::trait_::DocumentRepository;

/// Mock document repository for testing
#[derive(Default)]
pub struct MockDocumentRepository {
    documents: Arc<RwLock<HashMap<Uuid, Document>>>,
    fail_inserts: Arc<RwLock<bool>>,
}

impl MockDocumentRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert fail, to exercise compensation paths
    pub async fn fail_next_inserts(&self, fail: bool) {
        *self.fail_inserts.write().await = fail;
    }

    /// Number of stored documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn insert(&self, document: Document) -> Result<Document, DomainError> {
        if *self.fail_inserts.read().await {
            return Err(DomainError::Database {
                message: "injected insert failure".to_string(),
            });
        }

        let mut documents = self.documents.write().await;
        documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        let mut matching: Vec<Document> = documents
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(matching)
    }

    async fn latest_for_slot(
        &self,
        user_id: Uuid,
        slot: DocumentSlot,
    ) -> Result<Option<Document>, DomainError> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .filter(|d| d.user_id == user_id && d.slot == slot)
            .max_by_key(|d| d.uploaded_at)
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut documents = self.documents.write().await;
        Ok(documents.remove(&id).is_some())
    }
}
