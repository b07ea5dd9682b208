//! Adoption inquiry workflow and its HTTP surface.
//!
//! The service is synchronous and takes `&mut self` for anything that writes sessions. The
//! router shares one instance behind a `tokio::sync::Mutex`.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::{adoption_router, SessionView, SharedAdoptionService};
pub use service::{AdoptionService, AdoptionServiceError, InquiryOutcome, SimulationReport};
