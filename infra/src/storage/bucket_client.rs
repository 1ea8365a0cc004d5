//! Object-store client for the hosted storage service.
//!
//! Speaks the storage HTTP API of the hosted backend: authenticated uploads
//! with overwrite-on-conflict semantics, deletes for the upload compensation
//! path, and public URL derivation. Transient failures are retried with
//! exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use sg_core::errors::StorageError;
use sg_core::services::verification::DocumentStorage;
use sg_shared::config::StorageConfig;

use crate::InfrastructureError;

/// Base delay between retry attempts; doubles per attempt
const RETRY_BASE_DELAY_MS: u64 = 500;

/// HTTP client for the document bucket
pub struct BucketStorageClient {
    client: reqwest::Client,
    config: StorageConfig,
}

impl BucketStorageClient {
    /// Create a new storage client
    pub fn new(config: StorageConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.is_empty() {
            return Err(InfrastructureError::Config(
                "STORAGE_URL must not be empty".to_string(),
            ));
        }
        if config.bucket.is_empty() {
            return Err(InfrastructureError::Config(
                "STORAGE_BUCKET must not be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(bucket = %config.bucket, "storage client initialized");

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(StorageConfig::from_env())
    }

    /// Authenticated object endpoint for a path
    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bucket,
            path
        )
    }

    /// Public download URL for a path
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.bucket,
            path
        )
    }

    async fn backoff(&self, attempt: u32) {
        let delay = RETRY_BASE_DELAY_MS * (1 << attempt.min(4));
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}

#[async_trait]
impl DocumentStorage for BucketStorageClient {
    async fn put_object(
        &self,
        path: &str,
        content: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError> {
        let url = self.object_url(path);
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                debug!(path, attempt, "retrying object upload");
                self.backoff(attempt - 1).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .header("x-upsert", "true")
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(content.to_vec())
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    debug!(path, "object uploaded");
                    return Ok(self.public_url(path));
                }
                Ok(resp) if resp.status().is_server_error() => {
                    last_error = format!("server error: {}", resp.status());
                }
                Ok(resp) => {
                    // Client errors are not retryable
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(StorageError::Upload(format!(
                        "upload rejected ({}): {}",
                        status, body
                    )));
                }
                Err(err) => {
                    last_error = format!("transport error: {}", err);
                }
            }
        }

        warn!(path, error = %last_error, "object upload exhausted retries");
        Err(StorageError::Upload(last_error))
    }

    async fn delete_object(&self, path: &str) -> Result<(), StorageError> {
        let url = self.object_url(path);
        let mut last_error = String::new();

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                self.backoff(attempt - 1).await;
            }

            let response = self
                .client
                .delete(&url)
                .bearer_auth(&self.config.api_key)
                .send()
                .await;

            match response {
                // A missing object is already deleted
                Ok(resp) if resp.status().is_success() || resp.status() == StatusCode::NOT_FOUND => {
                    return Ok(());
                }
                Ok(resp) if resp.status().is_server_error() => {
                    last_error = format!("server error: {}", resp.status());
                }
                Ok(resp) => {
                    return Err(StorageError::Delete(format!(
                        "delete rejected: {}",
                        resp.status()
                    )));
                }
                Err(err) => {
                    last_error = format!("transport error: {}", err);
                }
            }
        }

        Err(StorageError::Delete(last_error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StorageConfig {
        StorageConfig {
            base_url: "https://project.storage.host/".to_string(),
            bucket: "user-documents".to_string(),
            api_key: "service-key".to_string(),
            request_timeout_secs: 5,
            max_retries: 1,
        }
    }

    #[test]
    fn test_object_url_trims_trailing_slash() {
        let client = BucketStorageClient::new(test_config()).unwrap();
        assert_eq!(
            client.object_url("verification/u1/id_front_1.jpg"),
            "https://project.storage.host/storage/v1/object/user-documents/verification/u1/id_front_1.jpg"
        );
    }

    #[test]
    fn test_public_url_shape() {
        let client = BucketStorageClient::new(test_config()).unwrap();
        assert_eq!(
            client.public_url("verification/u1/id_front_1.jpg"),
            "https://project.storage.host/storage/v1/object/public/user-documents/verification/u1/id_front_1.jpg"
        );
    }

    #[test]
    fn test_empty_base_url_is_rejected() {
        let config = StorageConfig {
            base_url: String::new(),
            ..test_config()
        };
        assert!(BucketStorageClient::new(config).is_err());
    }
}
