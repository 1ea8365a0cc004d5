//! DTOs for the verification endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sg_core::domain::entities::document::{Document, DocumentSlot, DocumentStatus};
use sg_core::domain::entities::user::{User, UserType, VerificationStatus};

/// Body of the admin reject action; the reason is optional and defaulted
/// server-side when absent
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct RejectUserRequest {
    /// Free-text reason shown to the rejected user
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Query parameters of the document upload endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    /// File extension of the uploaded content, e.g. "jpg"
    pub ext: String,
}

/// A user row as exposed to the admin back-office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub verification_status: VerificationStatus,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_front_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_back_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            user_type: user.user_type,
            verification_status: user.verification_status,
            is_active: user.is_active,
            rejection_reason: user.rejection_reason,
            id_front_url: user.id_front_url,
            id_back_url: user.id_back_url,
            certification_url: user.certification_url,
            other_url: user.other_url,
            reviewed_at: user.reviewed_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// An uploaded document as exposed over the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slot: DocumentSlot,
    pub url: String,
    pub status: DocumentStatus,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            user_id: document.user_id,
            slot: document.slot,
            url: document.url,
            status: document.status,
            uploaded_at: document.uploaded_at,
        }
    }
}
