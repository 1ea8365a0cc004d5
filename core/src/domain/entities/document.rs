//! Verification document entity.
//!
//! Each upload creates a new Document row; historical rows accumulate per
//! (user, slot) while the user row always points at the latest URL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical category of an uploaded identity/license file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSlot {
    IdFront,
    IdBack,
    Certification,
    Other,
}

impl DocumentSlot {
    /// Database/text representation, also used as the storage filename prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSlot::IdFront => "id_front",
            DocumentSlot::IdBack => "id_back",
            DocumentSlot::Certification => "certification",
            DocumentSlot::Other => "other",
        }
    }

    /// Parse from the database/text representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id_front" => Some(DocumentSlot::IdFront),
            "id_back" => Some(DocumentSlot::IdBack),
            "certification" => Some(DocumentSlot::Certification),
            "other" => Some(DocumentSlot::Other),
            _ => None,
        }
    }

    /// All known slots
    pub fn all() -> [DocumentSlot; 4] {
        [
            DocumentSlot::IdFront,
            DocumentSlot::IdBack,
            DocumentSlot::Certification,
            DocumentSlot::Other,
        ]
    }
}

/// Review state of an individual document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(DocumentStatus::Pending),
            "approved" => Some(DocumentStatus::Approved),
            "rejected" => Some(DocumentStatus::Rejected),
            _ => None,
        }
    }
}

/// A single uploaded verification document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Logical slot this upload fills
    pub slot: DocumentSlot,

    /// Public URL into the object store
    pub url: String,

    /// Review state; uploads always start pending
    pub status: DocumentStatus,

    /// When the file was uploaded
    pub uploaded_at: DateTime<Utc>,

    /// Admin who reviewed this document
    pub reviewed_by: Option<Uuid>,

    /// When the document was reviewed
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates a pending document for a fresh upload
    pub fn new(user_id: Uuid, slot: DocumentSlot, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            slot,
            url,
            status: DocumentStatus::Pending,
            uploaded_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        }
    }
}
