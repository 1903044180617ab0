use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::requests::domain::{
    ApplicantId, Application, ApplicationId, DocumentRequestRecord, DocumentRequestStatus,
    StoredDocumentRequest,
};
use crate::requests::memory::{InMemoryDocumentRequestStore, StoreFixture};
use crate::requests::service::{FixedClock, OutstandingRequestsService};
use crate::requests::store::{DocumentRequestStore, RetrievalError};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn resident() -> ApplicantId {
    ApplicantId("res-42".to_string())
}

pub(super) fn application(id: &str, days_ago: i64) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        resident_id: resident(),
        submitted_at: now() - Duration::days(days_ago),
    }
}

pub(super) fn record(
    token: &str,
    document_type_id: &str,
    expires_in: Duration,
) -> DocumentRequestRecord {
    DocumentRequestRecord {
        token: token.to_string(),
        document_type_id: document_type_id.to_string(),
        applicant_type: "main_applicant".to_string(),
        applicant_uuid: None,
        applicant_name: "Erika Mustermann".to_string(),
        custom_message: String::new(),
        requested_by: "agent-7".to_string(),
        requested_at: Some(now() - Duration::days(3)),
        expires_at: Some(now() + expires_in),
    }
}

pub(super) fn pending(application: &str, record: DocumentRequestRecord) -> StoredDocumentRequest {
    StoredDocumentRequest {
        application_id: ApplicationId(application.to_string()),
        status: DocumentRequestStatus::Pending,
        record,
    }
}

/// Two applications for the resident; only `app-current` carries open requests that matter.
pub(super) fn seeded_store() -> InMemoryDocumentRequestStore {
    let mut newest = record("tok-new", "meldebescheinigung", Duration::days(10));
    newest.requested_at = Some(now() - Duration::days(1));
    let mut older = record("tok-old", "xyz_unknown", -Duration::days(2));
    older.requested_at = Some(now() - Duration::days(8));

    let mut fulfilled = pending(
        "app-current",
        record("tok-done", "mietvertrag", Duration::days(5)),
    );
    fulfilled.status = DocumentRequestStatus::Fulfilled;

    InMemoryDocumentRequestStore::from_fixture(StoreFixture {
        applications: vec![
            application("app-previous", 90),
            application("app-current", 5),
        ],
        document_requests: vec![
            pending("app-current", older),
            pending("app-current", newest),
            fulfilled,
            pending(
                "app-previous",
                record("tok-stale", "steuerbescheid", Duration::days(30)),
            ),
        ],
    })
}

pub(super) fn build_service<S>(store: Arc<S>) -> OutstandingRequestsService<S, FixedClock>
where
    S: DocumentRequestStore + 'static,
{
    OutstandingRequestsService::with_clock(store, Arc::new(FixedClock(now())))
}

/// Wraps the in-memory store and counts the queries issued against it.
#[derive(Default)]
pub(super) struct RecordingStore {
    pub(super) inner: InMemoryDocumentRequestStore,
    pub(super) application_queries: AtomicUsize,
    pub(super) request_queries: AtomicUsize,
}

impl RecordingStore {
    pub(super) fn new(inner: InMemoryDocumentRequestStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub(super) fn request_queries(&self) -> usize {
        self.request_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentRequestStore for RecordingStore {
    async fn latest_application(
        &self,
        resident: &ApplicantId,
    ) -> Result<Option<Application>, RetrievalError> {
        self.application_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.latest_application(resident).await
    }

    async fn pending_requests(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<DocumentRequestRecord>, RetrievalError> {
        self.request_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.pending_requests(application).await
    }
}

/// Store whose application lookup always fails.
pub(super) struct UnreachableStore;

#[async_trait]
impl DocumentRequestStore for UnreachableStore {
    async fn latest_application(
        &self,
        _resident: &ApplicantId,
    ) -> Result<Option<Application>, RetrievalError> {
        Err(RetrievalError::Unavailable("connection refused".to_string()))
    }

    async fn pending_requests(
        &self,
        _application: &ApplicationId,
    ) -> Result<Vec<DocumentRequestRecord>, RetrievalError> {
        panic!("request query must not run after a failed application lookup")
    }
}

/// Store that finds an application but returns garbage for its requests.
pub(super) struct MalformedRequestsStore;

#[async_trait]
impl DocumentRequestStore for MalformedRequestsStore {
    async fn latest_application(
        &self,
        _resident: &ApplicantId,
    ) -> Result<Option<Application>, RetrievalError> {
        Ok(Some(application("app-current", 1)))
    }

    async fn pending_requests(
        &self,
        _application: &ApplicationId,
    ) -> Result<Vec<DocumentRequestRecord>, RetrievalError> {
        Err(RetrievalError::Malformed(
            "expected an array of document_requests".to_string(),
        ))
    }
}
