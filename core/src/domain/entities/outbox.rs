//! Notification outbox entity.
//!
//! Status mutations enqueue a row here; a separate dispatcher (out of scope)
//! drains the table. Enqueueing is best-effort and never fails the mutation
//! it follows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What happened, from the recipient's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    VerificationApproved,
    VerificationRejected,
    OfferReceived,
    OfferAccepted,
    OfferRejected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::VerificationApproved => "verification_approved",
            NotificationKind::VerificationRejected => "verification_rejected",
            NotificationKind::OfferReceived => "offer_received",
            NotificationKind::OfferAccepted => "offer_accepted",
            NotificationKind::OfferRejected => "offer_rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "verification_approved" => Some(NotificationKind::VerificationApproved),
            "verification_rejected" => Some(NotificationKind::VerificationRejected),
            "offer_received" => Some(NotificationKind::OfferReceived),
            "offer_accepted" => Some(NotificationKind::OfferAccepted),
            "offer_rejected" => Some(NotificationKind::OfferRejected),
            _ => None,
        }
    }
}

/// A staged notification awaiting dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxNotification {
    /// Unique identifier
    pub id: Uuid,

    /// Recipient user
    pub user_id: Uuid,

    /// Notification kind
    pub kind: NotificationKind,

    /// Kind-specific payload
    pub payload: serde_json::Value,

    /// When the notification was staged
    pub created_at: DateTime<Utc>,

    /// When the notification was dispatched, if it has been
    pub dispatched_at: Option<DateTime<Utc>>,
}

impl OutboxNotification {
    /// Stages a new notification
    pub fn new(user_id: Uuid, kind: NotificationKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            payload,
            created_at: Utc::now(),
            dispatched_at: None,
        }
    }
}
