//! Outbox repository trait for staged notifications.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::outbox::OutboxNotification;
use crate::errors::DomainError;

/// Repository trait for the notification outbox
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    /// Stage a notification for later dispatch
    async fn enqueue(
        &self,
        notification: OutboxNotification,
    ) -> Result<OutboxNotification, DomainError>;

    /// Oldest undispatched notifications, up to `limit`
    async fn pending_batch(&self, limit: i64) -> Result<Vec<OutboxNotification>, DomainError>;

    /// Mark a notification as dispatched
    ///
    /// # Returns
    /// * `Ok(true)` - Notification was marked
    /// * `Ok(false)` - Notification not found
    async fn mark_dispatched(&self, id: Uuid) -> Result<bool, DomainError>;
}
