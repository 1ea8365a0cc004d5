//! Main verification service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::document::{Document, DocumentSlot};
use crate::domain::entities::outbox::{NotificationKind, OutboxNotification};
use crate::domain::entities::user::{User, VerificationStatus};
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{DocumentRepository, OutboxRepository, UserRepository};

use super::config::VerificationServiceConfig;
use super::storage::{content_type_for, object_path, DocumentStorage};
use super::types::GateDecision;

/// Verification service mediating all reads and writes of user/document
/// verification state.
pub struct VerificationService<U, D, B, S>
where
    U: UserRepository,
    D: DocumentRepository,
    B: OutboxRepository,
    S: DocumentStorage,
{
    /// User repository for account state
    user_repository: Arc<U>,
    /// Document repository for upload rows
    document_repository: Arc<D>,
    /// Outbox repository for staged notifications
    outbox_repository: Arc<B>,
    /// Blob store for the uploaded files
    storage: Arc<S>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<U, D, B, S> VerificationService<U, D, B, S>
where
    U: UserRepository,
    D: DocumentRepository,
    B: OutboxRepository,
    S: DocumentStorage,
{
    /// Create a new verification service
    pub fn new(
        user_repository: Arc<U>,
        document_repository: Arc<D>,
        outbox_repository: Arc<B>,
        storage: Arc<S>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            document_repository,
            outbox_repository,
            storage,
            config,
        }
    }

    /// The FIFO review queue: every pending user, oldest registration first
    pub async fn pending_users(&self) -> DomainResult<Vec<User>> {
        self.user_repository
            .find_by_status(VerificationStatus::Pending)
            .await
    }

    /// Load a single user, failing with `NotFound` when absent
    pub async fn user_by_id(&self, id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// All documents a user has uploaded, newest first
    pub async fn user_documents(&self, user_id: Uuid) -> DomainResult<Vec<Document>> {
        // Surface NotFound for unknown users rather than an empty list
        let user = self.user_by_id(user_id).await?;
        self.document_repository.find_by_user(user.id).await
    }

    /// Mark an account as under review
    pub async fn begin_review(&self, id: Uuid, reviewer: Uuid) -> DomainResult<User> {
        self.apply_review(id, None, |user| user.begin_review(reviewer))
            .await
    }

    /// Approve an account, granting full access.
    ///
    /// The transition is validated on the entity, persisted with a
    /// compare-and-swap on the previously read `updated_at`, and followed by
    /// a best-effort notification enqueue. Re-approving a verified account
    /// is a no-op returning the current row.
    pub async fn approve_user(&self, id: Uuid, reviewer: Uuid) -> DomainResult<User> {
        let user = self
            .apply_review(id, Some(NotificationKind::VerificationApproved), |user| {
                user.approve(reviewer)
            })
            .await?;
        info!(user_id = %user.id, reviewer = %reviewer, "user approved");
        Ok(user)
    }

    /// Reject an account, blocking access.
    ///
    /// A missing, empty, or whitespace-only reason is stored as the default
    /// rejection reason. Re-rejecting a rejected account is a no-op.
    pub async fn reject_user(
        &self,
        id: Uuid,
        reviewer: Uuid,
        reason: Option<String>,
    ) -> DomainResult<User> {
        let user = self
            .apply_review(id, Some(NotificationKind::VerificationRejected), |user| {
                user.reject(reviewer, reason)
            })
            .await?;
        info!(user_id = %user.id, reviewer = %reviewer, "user rejected");
        Ok(user)
    }

    /// Ban an account outright
    pub async fn ban_user(&self, id: Uuid, reviewer: Uuid) -> DomainResult<User> {
        let user = self
            .apply_review(id, None, |user| user.ban(reviewer))
            .await?;
        info!(user_id = %user.id, reviewer = %reviewer, "user banned");
        Ok(user)
    }

    /// The mobile gate read: current status and access decision
    pub async fn verification_gate(&self, user_id: Uuid) -> DomainResult<GateDecision> {
        let user = self.user_by_id(user_id).await?;
        Ok(GateDecision::from_user(&user))
    }

    /// Store a verification document and link it to the user.
    ///
    /// The sequence is: blob upload, Document row insert, user slot-URL
    /// update. A failure after the blob upload compensates by deleting
    /// whatever was created, so neither an orphaned blob nor a divergent
    /// Document/user pair survives the error path.
    pub async fn upload_verification_document(
        &self,
        user_id: Uuid,
        slot: DocumentSlot,
        content: &[u8],
        ext: &str,
    ) -> DomainResult<Document> {
        let mut user = self.user_by_id(user_id).await?;

        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if !self.config.allows_extension(&ext) {
            return Err(VerificationError::UnsupportedDocumentType { ext }.into());
        }
        if content.is_empty() {
            return Err(VerificationError::EmptyDocument.into());
        }
        if content.len() > self.config.max_document_bytes {
            return Err(VerificationError::DocumentTooLarge {
                size: content.len(),
                max: self.config.max_document_bytes,
            }
            .into());
        }

        let path = object_path(user.id, slot, Utc::now().timestamp_millis(), &ext);
        let url = self
            .storage
            .put_object(&path, content, content_type_for(&ext))
            .await?;

        let document = Document::new(user.id, slot, url.clone());
        let document = match self.document_repository.insert(document).await {
            Ok(document) => document,
            Err(err) => {
                self.discard_blob(&path).await;
                return Err(err);
            }
        };

        user.set_document_url(slot, url);
        if let Err(err) = self.user_repository.update(user).await {
            if let Err(delete_err) = self.document_repository.delete(document.id).await {
                warn!(document_id = %document.id, error = %delete_err, "failed to delete document row during compensation");
            }
            self.discard_blob(&path).await;
            return Err(err);
        }

        info!(user_id = %user_id, slot = slot.as_str(), "verification document uploaded");
        Ok(document)
    }

    /// Shared review-transition flow: load, mutate, CAS-persist, notify.
    async fn apply_review<F>(
        &self,
        id: Uuid,
        notify: Option<NotificationKind>,
        mutate: F,
    ) -> DomainResult<User>
    where
        F: FnOnce(&mut User) -> Result<bool, VerificationError>,
    {
        let mut user = self.user_by_id(id).await?;
        let expected_updated_at = user.updated_at;

        let changed = mutate(&mut user)?;
        if !changed {
            // Idempotent repeat of a settled action; nothing to persist
            return Ok(user);
        }

        let user = self
            .user_repository
            .update_with_version(user, expected_updated_at)
            .await?;

        if let Some(kind) = notify {
            self.enqueue_notification(&user, kind).await;
        }

        Ok(user)
    }

    /// Best-effort notification staging; a failure is logged, never raised
    async fn enqueue_notification(&self, user: &User, kind: NotificationKind) {
        let payload = serde_json::json!({
            "status": user.verification_status.as_str(),
            "reason": user.rejection_reason,
        });
        let notification = OutboxNotification::new(user.id, kind, payload);
        if let Err(err) = self.outbox_repository.enqueue(notification).await {
            warn!(user_id = %user.id, error = %err, "failed to enqueue notification");
        }
    }

    /// Best-effort blob cleanup on a failed upload
    async fn discard_blob(&self, path: &str) {
        if let Err(err) = self.storage.delete_object(path).await {
            warn!(path, error = %err, "failed to delete orphaned blob");
        }
    }
}
