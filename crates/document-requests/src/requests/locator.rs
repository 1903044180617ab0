use std::sync::Arc;

use tracing::debug;

use super::domain::{ApplicantId, Application};
use super::store::{DocumentRequestStore, RetrievalError};

/// Outcome of looking up an applicant's current application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatedApplication {
    Found(Application),
    /// The applicant has not submitted anything yet; there is nothing to resolve.
    NotFound,
}

impl LocatedApplication {
    pub fn into_option(self) -> Option<Application> {
        match self {
            LocatedApplication::Found(application) => Some(application),
            LocatedApplication::NotFound => None,
        }
    }
}

/// Finds the most recently submitted application of an applicant.
pub struct ApplicationLocator<S> {
    store: Arc<S>,
}

impl<S> ApplicationLocator<S>
where
    S: DocumentRequestStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn locate_current_application(
        &self,
        applicant: &ApplicantId,
    ) -> Result<LocatedApplication, RetrievalError> {
        let located = match self.store.latest_application(applicant).await? {
            Some(application) => LocatedApplication::Found(application),
            None => LocatedApplication::NotFound,
        };

        debug!(
            applicant = %applicant,
            found = matches!(located, LocatedApplication::Found(_)),
            "located current application"
        );
        Ok(located)
    }
}
