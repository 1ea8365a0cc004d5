//! Shared test fixtures for API integration tests

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use uuid::Uuid;

use sg_api::middleware::auth::{Claims, Role};
use sg_api::routes::AppState;
use sg_core::domain::entities::user::{User, UserType};
use sg_core::errors::StorageError;
use sg_core::repositories::{
    MockDocumentRepository, MockOfferRepository, MockOutboxRepository, MockUserRepository,
};
use sg_core::services::verification::{
    DocumentStorage, VerificationService, VerificationServiceConfig,
};
use sg_core::services::OfferService;
use sg_shared::config::AuthConfig;

pub const TEST_SECRET: &str = "test_secret";

/// Storage double that accepts every upload
pub struct StubStorage;

#[async_trait]
impl DocumentStorage for StubStorage {
    async fn put_object(
        &self,
        path: &str,
        _content: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        Ok(format!("https://storage.test/user-documents/{}", path))
    }

    async fn delete_object(&self, _path: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

pub type TestState = AppState<
    MockUserRepository,
    MockDocumentRepository,
    MockOutboxRepository,
    StubStorage,
    MockOfferRepository,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
}

/// Build an app state wired entirely to in-memory doubles
pub fn test_state() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let documents = Arc::new(MockDocumentRepository::new());
    let outbox = Arc::new(MockOutboxRepository::new());
    let offers = Arc::new(MockOfferRepository::new());
    let storage = Arc::new(StubStorage);

    let verification_service = Arc::new(VerificationService::new(
        users.clone(),
        documents,
        outbox.clone(),
        storage,
        VerificationServiceConfig::default(),
    ));
    let offer_service = Arc::new(OfferService::new(offers, users.clone(), outbox));

    let state = web::Data::new(AppState {
        verification_service,
        offer_service,
        auth: AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            issuer: "servigo".to_string(),
        },
    });

    TestContext { state, users }
}

/// Bearer header value for a signed test token
pub fn bearer(user_id: Uuid, role: Role) -> String {
    let token = Claims::new(user_id, role, 3600).sign(TEST_SECRET).unwrap();
    format!("Bearer {}", token)
}

/// A pending professional account
pub fn pending_professional(email: &str) -> User {
    User::new(
        email.to_string(),
        "Test Professional".to_string(),
        UserType::Professional,
    )
}
