//! User entity representing a registered user in the ServiGo marketplace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::document::DocumentSlot;
use crate::errors::VerificationError;

/// Reason stored when an admin rejects a user without providing one.
pub const DEFAULT_REJECTION_REASON: &str = "Documentación rechazada";

/// Represents the type of user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A client booking services
    Client,
    /// A professional offering services
    Professional,
}

impl UserType {
    /// Database/text representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Client => "client",
            UserType::Professional => "professional",
        }
    }

    /// Parse from the database/text representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "client" => Some(UserType::Client),
            "professional" => Some(UserType::Professional),
            _ => None,
        }
    }
}

/// Verification state of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Awaiting admin review
    #[default]
    Pending,
    /// An admin has opened the review
    InReview,
    /// Terminal: full access granted
    Verified,
    /// Terminal: access blocked, carries a reason
    Rejected,
    /// Terminal: banned by an admin
    Banned,
}

impl VerificationStatus {
    /// Database/text representation
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::InReview => "in_review",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
            VerificationStatus::Banned => "banned",
        }
    }

    /// Parse from the database/text representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(VerificationStatus::Pending),
            "in_review" => Some(VerificationStatus::InReview),
            "verified" => Some(VerificationStatus::Verified),
            "rejected" => Some(VerificationStatus::Rejected),
            "banned" => Some(VerificationStatus::Banned),
            _ => None,
        }
    }

    /// Whether the status admits no further review transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VerificationStatus::Verified | VerificationStatus::Rejected | VerificationStatus::Banned
        )
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Contact email, unique per account
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Optional contact phone
    pub phone: Option<String>,

    /// Type of user (Client or Professional)
    pub user_type: UserType,

    /// Current verification state
    pub verification_status: VerificationStatus,

    /// Whether the account has full access; derived from the status
    pub is_active: bool,

    /// Present iff the user was rejected
    pub rejection_reason: Option<String>,

    /// Latest uploaded document URL per slot, mirrored on the row
    pub id_front_url: Option<String>,
    pub id_back_url: Option<String>,
    pub certification_url: Option<String>,
    pub other_url: Option<String>,

    /// Admin who last reviewed the account
    pub reviewed_by: Option<Uuid>,

    /// When the last review action happened
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User in the pending verification state
    pub fn new(email: String, full_name: String, user_type: UserType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            full_name,
            phone: None,
            user_type,
            verification_status: VerificationStatus::Pending,
            is_active: false,
            rejection_reason: None,
            id_front_url: None,
            id_back_url: None,
            certification_url: None,
            other_url: None,
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account as under review.
    ///
    /// Returns `false` when the account is already in review (no-op).
    pub fn begin_review(&mut self, reviewer: Uuid) -> Result<bool, VerificationError> {
        match self.verification_status {
            VerificationStatus::InReview => Ok(false),
            VerificationStatus::Pending => {
                self.verification_status = VerificationStatus::InReview;
                self.touch_review(reviewer);
                Ok(true)
            }
            from => Err(self.invalid_transition(from, VerificationStatus::InReview)),
        }
    }

    /// Approves the account, granting full access.
    ///
    /// Repeating the approval of an already verified account is a no-op
    /// (`Ok(false)`); approving a rejected or banned account is an error.
    pub fn approve(&mut self, reviewer: Uuid) -> Result<bool, VerificationError> {
        match self.verification_status {
            VerificationStatus::Verified => Ok(false),
            VerificationStatus::Pending | VerificationStatus::InReview => {
                self.verification_status = VerificationStatus::Verified;
                self.is_active = true;
                self.rejection_reason = None;
                self.touch_review(reviewer);
                Ok(true)
            }
            from => Err(self.invalid_transition(from, VerificationStatus::Verified)),
        }
    }

    /// Rejects the account, blocking access.
    ///
    /// An empty or whitespace-only reason is treated as absent and replaced
    /// with [`DEFAULT_REJECTION_REASON`]. Repeating the rejection of an
    /// already rejected account is a no-op (`Ok(false)`).
    pub fn reject(
        &mut self,
        reviewer: Uuid,
        reason: Option<String>,
    ) -> Result<bool, VerificationError> {
        match self.verification_status {
            VerificationStatus::Rejected => Ok(false),
            VerificationStatus::Pending | VerificationStatus::InReview => {
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string());
                self.verification_status = VerificationStatus::Rejected;
                self.is_active = false;
                self.rejection_reason = Some(reason);
                self.touch_review(reviewer);
                Ok(true)
            }
            from => Err(self.invalid_transition(from, VerificationStatus::Rejected)),
        }
    }

    /// Bans the account. Allowed from every state; repeating is a no-op.
    pub fn ban(&mut self, reviewer: Uuid) -> Result<bool, VerificationError> {
        if self.verification_status == VerificationStatus::Banned {
            return Ok(false);
        }
        self.verification_status = VerificationStatus::Banned;
        self.is_active = false;
        self.touch_review(reviewer);
        Ok(true)
    }

    /// Records the latest uploaded document URL for a slot
    pub fn set_document_url(&mut self, slot: DocumentSlot, url: String) {
        let field = match slot {
            DocumentSlot::IdFront => &mut self.id_front_url,
            DocumentSlot::IdBack => &mut self.id_back_url,
            DocumentSlot::Certification => &mut self.certification_url,
            DocumentSlot::Other => &mut self.other_url,
        };
        *field = Some(url);
        self.updated_at = Utc::now();
    }

    /// Current document URL for a slot, if any
    pub fn document_url(&self, slot: DocumentSlot) -> Option<&str> {
        match slot {
            DocumentSlot::IdFront => self.id_front_url.as_deref(),
            DocumentSlot::IdBack => self.id_back_url.as_deref(),
            DocumentSlot::Certification => self.certification_url.as_deref(),
            DocumentSlot::Other => self.other_url.as_deref(),
        }
    }

    /// Whether the account has passed verification
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }

    /// Checks if the user is a professional
    pub fn is_professional(&self) -> bool {
        self.user_type == UserType::Professional
    }

    fn touch_review(&mut self, reviewer: Uuid) {
        let now = Utc::now();
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(now);
        self.updated_at = now;
    }

    fn invalid_transition(
        &self,
        from: VerificationStatus,
        to: VerificationStatus,
    ) -> VerificationError {
        VerificationError::InvalidStatusTransition {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_user() -> User {
        User::new(
            "maria@example.com".to_string(),
            "María López".to_string(),
            UserType::Professional,
        )
    }

    #[test]
    fn test_new_user_is_pending_and_inactive() {
        let user = pending_user();
        assert_eq!(user.verification_status, VerificationStatus::Pending);
        assert!(!user.is_active);
        assert!(user.rejection_reason.is_none());
        assert!(user.reviewed_by.is_none());
    }

    #[test]
    fn test_approve_sets_active_and_reviewer() {
        let mut user = pending_user();
        let reviewer = Uuid::new_v4();

        let changed = user.approve(reviewer).unwrap();
        assert!(changed);
        assert_eq!(user.verification_status, VerificationStatus::Verified);
        assert!(user.is_active);
        assert_eq!(user.reviewed_by, Some(reviewer));
        assert!(user.reviewed_at.is_some());
    }

    #[test]
    fn test_approve_is_idempotent() {
        let mut user = pending_user();
        let reviewer = Uuid::new_v4();

        assert!(user.approve(reviewer).unwrap());
        let changed = user.approve(reviewer).unwrap();
        assert!(!changed);
        assert!(user.is_active);
        assert_eq!(user.verification_status, VerificationStatus::Verified);
    }

    #[test]
    fn test_reject_defaults_reason() {
        let mut user = pending_user();
        user.reject(Uuid::new_v4(), None).unwrap();
        assert_eq!(user.verification_status, VerificationStatus::Rejected);
        assert!(!user.is_active);
        assert_eq!(user.rejection_reason.as_deref(), Some(DEFAULT_REJECTION_REASON));
    }

    #[test]
    fn test_reject_blank_reason_is_defaulted() {
        let mut user = pending_user();
        user.reject(Uuid::new_v4(), Some("   ".to_string())).unwrap();
        assert_eq!(user.rejection_reason.as_deref(), Some(DEFAULT_REJECTION_REASON));
    }

    #[test]
    fn test_reject_keeps_explicit_reason() {
        let mut user = pending_user();
        user.reject(Uuid::new_v4(), Some("Documento ilegible".to_string()))
            .unwrap();
        assert_eq!(user.rejection_reason.as_deref(), Some("Documento ilegible"));
    }

    #[test]
    fn test_cross_terminal_transitions_fail() {
        let mut user = pending_user();
        user.approve(Uuid::new_v4()).unwrap();

        let err = user.reject(Uuid::new_v4(), None).unwrap_err();
        assert!(matches!(
            err,
            VerificationError::InvalidStatusTransition { .. }
        ));

        let mut rejected = pending_user();
        rejected.reject(Uuid::new_v4(), None).unwrap();
        assert!(rejected.approve(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_approve_clears_stale_rejection_reason() {
        let mut user = pending_user();
        user.verification_status = VerificationStatus::InReview;
        user.rejection_reason = Some("old".to_string());

        user.approve(Uuid::new_v4()).unwrap();
        assert!(user.rejection_reason.is_none());
    }

    #[test]
    fn test_ban_from_any_state() {
        let mut user = pending_user();
        user.approve(Uuid::new_v4()).unwrap();
        assert!(user.ban(Uuid::new_v4()).unwrap());
        assert_eq!(user.verification_status, VerificationStatus::Banned);
        assert!(!user.is_active);
        // Repeating is a no-op
        assert!(!user.ban(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn test_begin_review() {
        let mut user = pending_user();
        assert!(user.begin_review(Uuid::new_v4()).unwrap());
        assert_eq!(user.verification_status, VerificationStatus::InReview);
        assert!(!user.begin_review(Uuid::new_v4()).unwrap());
    }

    #[test]
    fn test_document_url_slots() {
        let mut user = pending_user();
        user.set_document_url(DocumentSlot::IdFront, "https://cdn/x.jpg".to_string());
        assert_eq!(user.document_url(DocumentSlot::IdFront), Some("https://cdn/x.jpg"));
        assert_eq!(user.document_url(DocumentSlot::IdBack), None);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&VerificationStatus::InReview).unwrap();
        assert_eq!(json, "\"in_review\"");
        let json = serde_json::to_string(&UserType::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }
}
