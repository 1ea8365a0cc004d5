//! Request and response DTOs for the API surface.

pub mod offer;
pub mod verification;
