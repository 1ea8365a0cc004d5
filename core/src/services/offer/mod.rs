//! Service-offer workflow: professionals bid on client service requests.

mod service;

pub use service::OfferService;
