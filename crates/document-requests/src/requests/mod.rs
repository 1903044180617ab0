//! Outstanding document requests: locate the applicant's current application, fetch its
//! pending requests and describe them for display.

pub mod catalog;
pub mod domain;
pub mod locator;
pub mod memory;
pub mod resolver;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use catalog::{DocumentGroup, DocumentMetadata, GENERIC_DESCRIPTION};
pub use domain::{
    ApplicantId, Application, ApplicationId, DocumentRequestRecord, DocumentRequestStatus,
    EnrichedDocumentRequest, StoredDocumentRequest,
};
pub use locator::{ApplicationLocator, LocatedApplication};
pub use memory::{FixtureError, InMemoryDocumentRequestStore, StoreFixture};
pub use resolver::{enrich, enrich_all, is_expired, RequestResolver, REQUESTING_AGENT_NAME};
pub use router::document_request_router;
pub use service::{Clock, FixedClock, OutstandingRequestsService, ResolutionState, SystemClock};
pub use store::{DocumentRequestStore, RetrievalError};
