use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{ApplicantId, EnrichedDocumentRequest};
use super::locator::{ApplicationLocator, LocatedApplication};
use super::resolver::RequestResolver;
use super::store::{DocumentRequestStore, RetrievalError};

/// Source of the resolution instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant, for reproducible listings.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Entry point composing the application locator and the request resolver.
pub struct OutstandingRequestsService<S, C = SystemClock> {
    locator: ApplicationLocator<S>,
    resolver: RequestResolver<S>,
    clock: Arc<C>,
}

impl<S> OutstandingRequestsService<S, SystemClock>
where
    S: DocumentRequestStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }
}

impl<S, C> OutstandingRequestsService<S, C>
where
    S: DocumentRequestStore + 'static,
    C: Clock + 'static,
{
    pub fn with_clock(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            locator: ApplicationLocator::new(store.clone()),
            resolver: RequestResolver::new(store),
            clock,
        }
    }

    /// Outstanding requests of the applicant's most recent application, newest first.
    ///
    /// An applicant without applications gets an empty list and the request query is never
    /// issued. Store failures are returned unchanged.
    pub async fn resolve_outstanding_requests(
        &self,
        applicant: &ApplicantId,
    ) -> Result<Vec<EnrichedDocumentRequest>, RetrievalError> {
        let application = match self.locator.locate_current_application(applicant).await {
            Ok(LocatedApplication::Found(application)) => application,
            Ok(LocatedApplication::NotFound) => {
                debug!(applicant = %applicant, "no application on file");
                return Ok(Vec::new());
            }
            Err(error) => {
                warn!(applicant = %applicant, %error, "application lookup failed");
                return Err(error);
            }
        };

        let now = self.clock.now();
        self.resolver
            .resolve_outstanding_requests(&application.id, now)
            .await
            .inspect_err(|error| {
                warn!(application = %application.id, %error, "document request lookup failed");
            })
    }
}

/// What the presentation layer shows for one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolutionState {
    /// Resolution still in flight.
    #[default]
    Loading,
    /// Advisory note; the message is shown verbatim.
    Failed { message: String },
    /// Possibly empty; empty means nothing is outstanding.
    Ready {
        requests: Vec<EnrichedDocumentRequest>,
    },
}

impl ResolutionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ResolutionState::Loading)
    }
}

impl From<Result<Vec<EnrichedDocumentRequest>, RetrievalError>> for ResolutionState {
    fn from(value: Result<Vec<EnrichedDocumentRequest>, RetrievalError>) -> Self {
        match value {
            Ok(requests) => ResolutionState::Ready { requests },
            Err(error) => ResolutionState::Failed {
                message: error.to_string(),
            },
        }
    }
}
