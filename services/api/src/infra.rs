use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use document_requests::config::{parse_time_zone, StoreConfig};
use document_requests::display::{parse_timestamp, DisplayFormatter};
use document_requests::requests::{FixtureError, InMemoryDocumentRequestStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) display: DisplayFormatter,
}

/// Seed the in-memory store from `path`, or start empty when no fixture is configured.
pub(crate) async fn load_store(
    path: Option<&Path>,
) -> Result<InMemoryDocumentRequestStore, FixtureError> {
    let Some(path) = path else {
        info!("no fixture configured; starting with an empty document store");
        return Ok(InMemoryDocumentRequestStore::default());
    };

    let store = InMemoryDocumentRequestStore::from_path(path)?;
    let (applications, requests) = store.counts().await;
    info!(
        fixture = %path.display(),
        applications,
        requests,
        "document store seeded"
    );
    Ok(store)
}

pub(crate) async fn load_configured_store(
    config: &StoreConfig,
) -> Result<InMemoryDocumentRequestStore, FixtureError> {
    load_store(config.fixtures_path.as_deref()).await
}

pub(crate) fn parse_zone(raw: &str) -> Result<Tz, String> {
    parse_time_zone(raw).map_err(|err| err.to_string())
}

pub(crate) fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(raw, Tz::UTC)
        .ok_or_else(|| format!("failed to parse '{raw}' as an RFC 3339 timestamp"))
}
