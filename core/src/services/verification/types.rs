//! Result types returned by the verification service

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::{User, VerificationStatus};

/// The mobile gate read: whether the user may pass the pending-approval
/// screen, and why not if they may not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    /// User the decision applies to
    pub user_id: Uuid,

    /// Current verification state
    pub status: VerificationStatus,

    /// True only for verified accounts
    pub access_granted: bool,

    /// Present when the account was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl GateDecision {
    /// Derive the gate decision from a user row
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            status: user.verification_status,
            access_granted: user.is_verified(),
            rejection_reason: user.rejection_reason.clone(),
        }
    }
}
