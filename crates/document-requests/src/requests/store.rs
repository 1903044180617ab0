use async_trait::async_trait;

use super::domain::{ApplicantId, Application, ApplicationId, DocumentRequestRecord};

/// Read-only access to the persistent store holding applications and document requests.
///
/// Implementations own transport, timeouts and retries; callers see either rows or a
/// [`RetrievalError`], and an empty result is never reported as an error.
#[async_trait]
pub trait DocumentRequestStore: Send + Sync {
    /// Most recently submitted application of `resident`.
    ///
    /// Ordered by `submitted_at` descending with `id` descending as tie-break, limited to one row.
    async fn latest_application(
        &self,
        resident: &ApplicantId,
    ) -> Result<Option<Application>, RetrievalError>;

    /// Pending requests of `application`, most recently requested first.
    ///
    /// Rows without `requested_at` sort last; remaining ties are ordered by token.
    async fn pending_requests(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<DocumentRequestRecord>, RetrievalError>;
}

/// Failure to obtain rows from the store, distinct from an empty result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetrievalError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed store response: {0}")]
    Malformed(String),
}
