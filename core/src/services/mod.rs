//! Business services containing domain logic and use cases.

pub mod offer;
pub mod verification;

// Re-export commonly used types
pub use offer::OfferService;
pub use verification::{
    DocumentStorage, GateDecision, VerificationService, VerificationServiceConfig,
};
