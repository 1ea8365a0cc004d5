//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides the database access layer including:
//! - Connection pool management
//! - Repository pattern implementations

pub mod connection;
pub mod postgres;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::{
    PgDocumentRepository, PgOfferRepository, PgOutboxRepository, PgUserRepository,
};
