//! Object-store configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the hosted object store holding verification documents
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Base URL of the storage service
    pub base_url: String,

    /// Bucket name for verification documents
    pub bucket: String,

    /// Service API key used for authenticated uploads
    pub api_key: String,

    /// Timeout for storage API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum retry attempts for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:54321"),
            bucket: String::from("user-documents"),
            api_key: String::new(),
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("STORAGE_URL")
                .unwrap_or_else(|_| "http://localhost:54321".to_string()),
            bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "user-documents".to_string()),
            api_key: std::env::var("STORAGE_API_KEY").unwrap_or_default(),
            request_timeout_secs: std::env::var("STORAGE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            max_retries: std::env::var("STORAGE_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_retries),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}
