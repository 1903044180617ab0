use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::catalog;
use super::domain::{ApplicationId, DocumentRequestRecord, EnrichedDocumentRequest};
use super::store::{DocumentRequestStore, RetrievalError};

/// Attribution shown for every request. No agent directory is consulted.
pub const REQUESTING_AGENT_NAME: &str = "Sachbearbeitung";

/// Prefix of the positional key given to records that arrive without a token.
pub const UNTOKENED_PREFIX: &str = "untokened";

/// A request is expired once its deadline lies strictly before `now`.
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|deadline| deadline < now)
}

/// Attach display metadata and the expiration flag to a single record.
pub fn enrich(request: DocumentRequestRecord, now: DateTime<Utc>) -> EnrichedDocumentRequest {
    let document_title = catalog::title_for(&request.document_type_id);
    let document_description = catalog::description_for(&request.document_type_id).to_string();
    let is_expired = is_expired(request.expires_at, now);

    EnrichedDocumentRequest {
        request,
        document_title,
        document_description,
        requesting_agent_name: REQUESTING_AGENT_NAME,
        is_expired,
    }
}

/// Enrich records in retrieval order, keeping tokens unique within the result.
///
/// Every record is kept. Records without a token get a positional key; a token that is
/// already taken (a repeated store token or a clash with a positional key) gets the first free
/// `#<n>` suffix, starting at 2, and the collision is logged.
pub fn enrich_all(
    records: Vec<DocumentRequestRecord>,
    now: DateTime<Utc>,
) -> Vec<EnrichedDocumentRequest> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut enriched = Vec::with_capacity(records.len());

    for (index, mut record) in records.into_iter().enumerate() {
        if record.token.trim().is_empty() {
            record.token = format!("{UNTOKENED_PREFIX}-{index}");
        }

        if seen.contains(&record.token) {
            let unique = disambiguate(&record.token, &seen);
            warn!(
                token = %record.token,
                assigned = %unique,
                document_type_id = %record.document_type_id,
                "document request token already taken"
            );
            record.token = unique;
        }

        seen.insert(record.token.clone());
        enriched.push(enrich(record, now));
    }

    enriched
}

fn disambiguate(token: &str, seen: &HashSet<String>) -> String {
    (2..)
        .map(|suffix| format!("{token}#{suffix}"))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or_else(|| token.to_string())
}

/// Retrieves pending requests of an application and enriches them for display.
pub struct RequestResolver<S> {
    store: Arc<S>,
}

impl<S> RequestResolver<S>
where
    S: DocumentRequestStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn resolve_outstanding_requests(
        &self,
        application: &ApplicationId,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnrichedDocumentRequest>, RetrievalError> {
        let records = self.store.pending_requests(application).await?;
        let retrieved = records.len();
        let enriched = enrich_all(records, now);

        debug!(
            application = %application,
            retrieved,
            resolved = enriched.len(),
            expired = enriched.iter().filter(|request| request.is_expired).count(),
            "resolved outstanding document requests"
        );
        Ok(enriched)
    }
}
