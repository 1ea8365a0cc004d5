//! Domain entities for the ServiGo marketplace.

pub mod document;
pub mod outbox;
pub mod service_offer;
pub mod user;

pub use document::{Document, DocumentSlot, DocumentStatus};
pub use outbox::{NotificationKind, OutboxNotification};
pub use service_offer::{OfferStatus, ServiceOffer};
pub use user::{User, UserType, VerificationStatus, DEFAULT_REJECTION_REASON};
