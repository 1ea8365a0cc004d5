//! Behavioral tests for the verification workflow

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::document::{DocumentSlot, DocumentStatus};
use crate::domain::entities::outbox::NotificationKind;
use crate::domain::entities::user::{
    User, UserType, VerificationStatus, DEFAULT_REJECTION_REASON,
};
use crate::errors::{DomainError, VerificationError};
use crate::repositories::{
    MockDocumentRepository, MockOutboxRepository, MockUserRepository, UserRepository,
};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

use super::mocks::MemoryDocumentStorage;

type TestService = VerificationService<
    MockUserRepository,
    MockDocumentRepository,
    MockOutboxRepository,
    MemoryDocumentStorage,
>;

struct Fixture {
    service: TestService,
    users: Arc<MockUserRepository>,
    documents: Arc<MockDocumentRepository>,
    outbox: Arc<MockOutboxRepository>,
    storage: Arc<MemoryDocumentStorage>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let documents = Arc::new(MockDocumentRepository::new());
    let outbox = Arc::new(MockOutboxRepository::new());
    let storage = Arc::new(MemoryDocumentStorage::new());

    let service = VerificationService::new(
        users.clone(),
        documents.clone(),
        outbox.clone(),
        storage.clone(),
        VerificationServiceConfig::default(),
    );

    Fixture {
        service,
        users,
        documents,
        outbox,
        storage,
    }
}

fn professional(email: &str) -> User {
    User::new(
        email.to_string(),
        "Test Professional".to_string(),
        UserType::Professional,
    )
}

#[tokio::test]
async fn pending_queue_is_fifo_and_excludes_settled_users() {
    let f = fixture();

    let mut oldest = professional("oldest@example.com");
    oldest.created_at = oldest.created_at - Duration::hours(2);
    let newest = professional("newest@example.com");
    let mut settled = professional("settled@example.com");
    settled.approve(Uuid::new_v4()).unwrap();

    f.users.insert(newest.clone()).await;
    f.users.insert(oldest.clone()).await;
    f.users.insert(settled).await;

    let queue = f.service.pending_users().await.unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].id, oldest.id);
    assert_eq!(queue[1].id, newest.id);
}

#[tokio::test]
async fn user_by_id_fails_with_not_found() {
    let f = fixture();
    let err = f.service.user_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn approve_sets_active_and_stages_notification() {
    let f = fixture();
    let user = professional("p1@example.com");
    f.users.insert(user.clone()).await;

    let reviewer = Uuid::new_v4();
    let approved = f.service.approve_user(user.id, reviewer).await.unwrap();

    assert_eq!(approved.verification_status, VerificationStatus::Verified);
    assert!(approved.is_active);
    assert_eq!(approved.reviewed_by, Some(reviewer));

    let staged = f
        .outbox
        .staged_of_kind(NotificationKind::VerificationApproved)
        .await;
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].user_id, user.id);
}

#[tokio::test]
async fn approve_twice_returns_same_shape_without_second_notification() {
    let f = fixture();
    let user = professional("p2@example.com");
    f.users.insert(user.clone()).await;

    let first = f.service.approve_user(user.id, Uuid::new_v4()).await.unwrap();
    let second = f.service.approve_user(user.id, Uuid::new_v4()).await.unwrap();

    assert!(first.is_active && second.is_active);
    assert_eq!(second.verification_status, VerificationStatus::Verified);

    // Idempotent repeat stages no duplicate notification
    let staged = f
        .outbox
        .staged_of_kind(NotificationKind::VerificationApproved)
        .await;
    assert_eq!(staged.len(), 1);
}

#[tokio::test]
async fn reject_without_reason_stores_default() {
    let f = fixture();
    let user = professional("p3@example.com");
    f.users.insert(user.clone()).await;

    let rejected = f
        .service
        .reject_user(user.id, Uuid::new_v4(), None)
        .await
        .unwrap();

    assert_eq!(rejected.verification_status, VerificationStatus::Rejected);
    assert!(!rejected.is_active);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some(DEFAULT_REJECTION_REASON)
    );
}

#[tokio::test]
async fn reject_with_reason_stores_exact_string() {
    let f = fixture();
    let user = professional("p4@example.com");
    f.users.insert(user.clone()).await;

    let rejected = f
        .service
        .reject_user(user.id, Uuid::new_v4(), Some("Documento ilegible".to_string()))
        .await
        .unwrap();

    assert_eq!(rejected.rejection_reason.as_deref(), Some("Documento ilegible"));
}

#[tokio::test]
async fn reject_after_approve_is_an_invalid_transition() {
    let f = fixture();
    let user = professional("p5@example.com");
    f.users.insert(user.clone()).await;

    f.service.approve_user(user.id, Uuid::new_v4()).await.unwrap();
    let err = f
        .service
        .reject_user(user.id, Uuid::new_v4(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::InvalidStatusTransition { .. })
    ));
}

#[tokio::test]
async fn concurrent_review_loses_with_conflict() {
    let f = fixture();
    let user = professional("p6@example.com");
    f.users.insert(user.clone()).await;

    // Another reviewer wins the race between our read and write
    let mut raced = f.users.find_by_id(user.id).await.unwrap().unwrap();
    let stale_read = raced.updated_at - Duration::seconds(1);
    raced.approve(Uuid::new_v4()).unwrap();
    f.users.insert(raced).await;

    let err = f
        .users
        .update_with_version(user, stale_read)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn outbox_failure_does_not_fail_the_approval() {
    let f = fixture();
    let user = professional("p7@example.com");
    f.users.insert(user.clone()).await;
    f.outbox.fail_next_enqueues(true).await;

    let approved = f.service.approve_user(user.id, Uuid::new_v4()).await.unwrap();
    assert!(approved.is_active);
}

#[tokio::test]
async fn upload_links_document_and_user_slot() {
    let f = fixture();
    let user = professional("p8@example.com");
    f.users.insert(user.clone()).await;

    let document = f
        .service
        .upload_verification_document(user.id, DocumentSlot::IdFront, b"jpegdata", "jpg")
        .await
        .unwrap();

    assert_eq!(document.slot, DocumentSlot::IdFront);
    assert_eq!(document.status, DocumentStatus::Pending);

    let stored = f.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.id_front_url.as_deref(), Some(document.url.as_str()));
    assert!(document.url.contains("verification/"));
    assert_eq!(f.storage.object_count().await, 1);
}

#[tokio::test]
async fn upload_rejects_unknown_extension_and_empty_content() {
    let f = fixture();
    let user = professional("p9@example.com");
    f.users.insert(user.clone()).await;

    let err = f
        .service
        .upload_verification_document(user.id, DocumentSlot::Other, b"x", "exe")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::UnsupportedDocumentType { .. })
    ));

    let err = f
        .service
        .upload_verification_document(user.id, DocumentSlot::Other, b"", "jpg")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::EmptyDocument)
    ));
}

#[tokio::test]
async fn upload_rejects_oversized_content() {
    let f = fixture();
    let user = professional("p10@example.com");
    f.users.insert(user.clone()).await;

    let config = VerificationServiceConfig {
        max_document_bytes: 4,
        ..Default::default()
    };
    let service = VerificationService::new(
        f.users.clone(),
        f.documents.clone(),
        f.outbox.clone(),
        f.storage.clone(),
        config,
    );

    let err = service
        .upload_verification_document(user.id, DocumentSlot::IdBack, b"too large", "png")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::DocumentTooLarge { .. })
    ));
}

#[tokio::test]
async fn failed_document_insert_compensates_the_blob() {
    let f = fixture();
    let user = professional("p11@example.com");
    f.users.insert(user.clone()).await;
    f.documents.fail_next_inserts(true).await;

    let err = f
        .service
        .upload_verification_document(user.id, DocumentSlot::IdFront, b"data", "jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));

    // The blob was removed and no document row survives
    assert_eq!(f.storage.object_count().await, 0);
    assert!(f.documents.is_empty().await);

    // The user row still has no slot URL
    let stored = f.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.id_front_url.is_none());
}

#[tokio::test]
async fn failed_user_update_compensates_document_and_blob() {
    let f = fixture();
    let user = professional("p12@example.com");
    f.users.insert(user.clone()).await;
    f.users.fail_next_updates(true).await;

    let err = f
        .service
        .upload_verification_document(user.id, DocumentSlot::Certification, b"data", "pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database { .. }));

    assert_eq!(f.storage.object_count().await, 0);
    assert!(f.documents.is_empty().await);
}

#[tokio::test]
async fn gate_reflects_status_and_reason() {
    let f = fixture();
    let user = professional("p13@example.com");
    f.users.insert(user.clone()).await;

    let gate = f.service.verification_gate(user.id).await.unwrap();
    assert!(!gate.access_granted);
    assert_eq!(gate.status, VerificationStatus::Pending);

    f.service
        .reject_user(user.id, Uuid::new_v4(), Some("Falta el reverso".to_string()))
        .await
        .unwrap();

    let gate = f.service.verification_gate(user.id).await.unwrap();
    assert!(!gate.access_granted);
    assert_eq!(gate.status, VerificationStatus::Rejected);
    assert_eq!(gate.rejection_reason.as_deref(), Some("Falta el reverso"));
}

#[tokio::test]
async fn begin_review_moves_pending_out_of_the_queue() {
    let f = fixture();
    let user = professional("p14@example.com");
    f.users.insert(user.clone()).await;

    f.service.begin_review(user.id, Uuid::new_v4()).await.unwrap();

    let queue = f.service.pending_users().await.unwrap();
    assert!(queue.is_empty());

    let stored = f.users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.verification_status, VerificationStatus::InReview);
}

#[tokio::test]
async fn documents_listing_requires_known_user() {
    let f = fixture();
    let err = f.service.user_documents(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
