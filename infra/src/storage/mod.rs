//! Storage module - object-store client for verification documents

pub mod bucket_client;

pub use bucket_client::BucketStorageClient;
