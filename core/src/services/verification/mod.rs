//! Verification service module for the user approval workflow
//!
//! This module provides the complete verification workflow including:
//! - The FIFO pending-review queue
//! - Approve/reject/ban transitions with optimistic concurrency
//! - Document upload with storage linkage and failure compensation
//! - The mobile gate read (status + access decision)

mod config;
mod service;
mod storage;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use storage::{content_type_for, object_path, DocumentStorage};
pub use types::GateDecision;
