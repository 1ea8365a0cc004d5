//! Shared utilities and common types for the ServiGo server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response wrapper structures
//! - Common type definitions

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, ServerConfig, StorageConfig,
};
pub use types::{ApiResponse, ErrorResponse};
