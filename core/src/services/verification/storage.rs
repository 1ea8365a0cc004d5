//! Object-storage integration trait and path conventions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::document::DocumentSlot;
use crate::errors::StorageError;

/// Trait for the blob store holding verification documents
///
/// Implementations live in the infrastructure layer; an in-memory double
/// backs the service tests.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store an object, overwriting any existing object at `path`.
    ///
    /// Returns the public URL of the stored object.
    async fn put_object(
        &self,
        path: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Delete an object (upload compensation path). Deleting a missing
    /// object is not an error.
    async fn delete_object(&self, path: &str) -> Result<(), StorageError>;
}

/// Storage path for a verification document:
/// `verification/{user_id}/{slot}_{timestamp_millis}.{ext}`
pub fn object_path(user_id: Uuid, slot: DocumentSlot, timestamp_millis: i64, ext: &str) -> String {
    format!(
        "verification/{}/{}_{}.{}",
        user_id,
        slot.as_str(),
        timestamp_millis,
        ext
    )
}

/// MIME type for an accepted document extension
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
