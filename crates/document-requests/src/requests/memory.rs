//! In-process implementation of [`DocumentRequestStore`].
//!
//! Rows live in two vectors behind `tokio::sync::RwLock`s and are seeded either
//! programmatically or from a JSON fixture shaped like [`StoreFixture`]. Nothing is persisted;
//! the store backs local runs, demos and tests.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::domain::{
    ApplicantId, Application, ApplicationId, DocumentRequestRecord, DocumentRequestStatus,
    StoredDocumentRequest,
};
use super::store::{DocumentRequestStore, RetrievalError};

/// Seed data for [`InMemoryDocumentRequestStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreFixture {
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub document_requests: Vec<StoredDocumentRequest>,
}

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("unable to read fixture {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct InMemoryDocumentRequestStore {
    applications: RwLock<Vec<Application>>,
    requests: RwLock<Vec<StoredDocumentRequest>>,
}

impl InMemoryDocumentRequestStore {
    pub fn from_fixture(fixture: StoreFixture) -> Self {
        Self {
            applications: RwLock::new(fixture.applications),
            requests: RwLock::new(fixture.document_requests),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FixtureError> {
        let fixture: StoreFixture = serde_json::from_reader(reader)?;
        Ok(Self::from_fixture(fixture))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub async fn insert_application(&self, application: Application) {
        self.applications.write().await.push(application);
    }

    pub async fn insert_request(&self, request: StoredDocumentRequest) {
        self.requests.write().await.push(request);
    }

    /// Number of applications and document requests currently held.
    pub async fn counts(&self) -> (usize, usize) {
        let applications = self.applications.read().await.len();
        let requests = self.requests.read().await.len();
        (applications, requests)
    }
}

#[async_trait]
impl DocumentRequestStore for InMemoryDocumentRequestStore {
    async fn latest_application(
        &self,
        resident: &ApplicantId,
    ) -> Result<Option<Application>, RetrievalError> {
        let applications = self.applications.read().await;
        Ok(applications
            .iter()
            .filter(|application| &application.resident_id == resident)
            .max_by(|left, right| {
                left.submitted_at
                    .cmp(&right.submitted_at)
                    .then_with(|| left.id.cmp(&right.id))
            })
            .cloned())
    }

    async fn pending_requests(
        &self,
        application: &ApplicationId,
    ) -> Result<Vec<DocumentRequestRecord>, RetrievalError> {
        let requests = self.requests.read().await;
        let mut pending: Vec<DocumentRequestRecord> = requests
            .iter()
            .filter(|row| {
                &row.application_id == application && row.status == DocumentRequestStatus::Pending
            })
            .map(|row| row.record.clone())
            .collect();

        // `None` sorts below `Some`, so reversing puts undated rows last.
        pending.sort_by(|left, right| {
            right
                .requested_at
                .cmp(&left.requested_at)
                .then_with(|| left.token.cmp(&right.token))
        });
        Ok(pending)
    }
}
