//! Request handling support: domain-error translation.

pub mod error;
