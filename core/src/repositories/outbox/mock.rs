//! Mock implementation of OutboxRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::outbox::{NotificationKind, OutboxNotification};
use crate::errors::DomainError;

use super::trait_::OutboxRepository;

/// Mock outbox repository for testing
#[derive(Default)]
pub struct MockOutboxRepository {
    notifications: Arc<RwLock<HashMap<Uuid, OutboxNotification>>>,
    fail_enqueue: Arc<RwLock<bool>>,
}

impl MockOutboxRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent enqueue fail; status mutations must survive this
    pub async fn fail_next_enqueues(&self, fail: bool) {
        *self.fail_enqueue.write().await = fail;
    }

    /// All staged notifications of a given kind, for assertions
    pub async fn staged_of_kind(&self, kind: NotificationKind) -> Vec<OutboxNotification> {
        self.notifications
            .read()
            .await
            .values()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OutboxRepository for MockOutboxRepository {
    async fn enqueue(
        &self,
        notification: OutboxNotification,
    ) -> Result<OutboxNotification, DomainError> {
        if *self.fail_enqueue.read().await {
            return Err(DomainError::Database {
                message: "injected enqueue failure".to_string(),
            });
        }

        let mut notifications = self.notifications.write().await;
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn pending_batch(&self, limit: i64) -> Result<Vec<OutboxNotification>, DomainError> {
        let notifications = self.notifications.read().await;
        let mut pending: Vec<OutboxNotification> = notifications
            .values()
            .filter(|n| n.dispatched_at.is_none())
            .cloned()
            .collect();
        pending.sort_by_key(|n| n.created_at);
        pending.truncate(limit.max(0) as usize);
        Ok(pending)
    }

    async fn mark_dispatched(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut notifications = self.notifications.write().await;
        match notifications.get_mut(&id) {
            Some(n) => {
                n.dispatched_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
