//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the ServiGo backend,
//! following Clean Architecture principles. It provides concrete
//! implementations for database access and the document object store.
//!
//! ## Architecture
//!
//! - **Database**: PostgreSQL implementations of the core repository traits
//!   using SQLx
//! - **Storage**: HTTP client for the hosted object store holding
//!   verification documents

use thiserror::Error;

/// Database module - PostgreSQL implementations using SQLx
pub mod database;

/// Storage module - object-store client
pub mod storage;

/// Errors raised while constructing infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}
