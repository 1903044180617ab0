use crate::infra::AppState;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use document_requests::requests::catalog::{self, DocumentGroup, DocumentMetadata};
use document_requests::requests::{
    document_request_router, Clock, DocumentRequestStore, OutstandingRequestsService,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CatalogEntryView {
    pub(crate) id: &'static str,
    pub(crate) group_label: &'static str,
    #[serde(flatten)]
    pub(crate) metadata: &'static DocumentMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TimestampQuery {
    #[serde(default)]
    pub(crate) value: String,
}

pub(crate) fn with_document_request_routes<S, C>(
    service: Arc<OutstandingRequestsService<S, C>>,
) -> axum::Router
where
    S: DocumentRequestStore + 'static,
    C: Clock + 'static,
{
    document_request_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/document-types",
            axum::routing::get(catalog_endpoint),
        )
        .route(
            "/api/v1/display/timestamp",
            axum::routing::get(display_timestamp_endpoint),
        )
}

pub(crate) fn catalog_views() -> Vec<CatalogEntryView> {
    DocumentGroup::ALL
        .into_iter()
        .flat_map(|group| {
            catalog::entries(group)
                .into_iter()
                .map(move |(id, metadata)| CatalogEntryView {
                    id,
                    group_label: group.label(),
                    metadata,
                })
        })
        .collect()
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint() -> Json<Vec<CatalogEntryView>> {
    Json(catalog_views())
}

pub(crate) async fn display_timestamp_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<TimestampQuery>,
) -> Json<serde_json::Value> {
    Json(json!({
        "value": query.value,
        "display": state.display.format_raw(&query.value),
        "time_zone": state.display.zone().name(),
    }))
}
