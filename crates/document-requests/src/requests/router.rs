use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::ApplicantId;
use super::service::{Clock, OutstandingRequestsService, ResolutionState};
use super::store::DocumentRequestStore;

/// Router exposing the outstanding document requests of a resident.
pub fn document_request_router<S, C>(service: Arc<OutstandingRequestsService<S, C>>) -> Router
where
    S: DocumentRequestStore + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/residents/:resident_id/document-requests",
            get(outstanding_requests_handler::<S, C>),
        )
        .with_state(service)
}

pub(crate) async fn outstanding_requests_handler<S, C>(
    State(service): State<Arc<OutstandingRequestsService<S, C>>>,
    Path(resident_id): Path<String>,
) -> Response
where
    S: DocumentRequestStore + 'static,
    C: Clock + 'static,
{
    let Some(applicant) = ApplicantId::parse(&resident_id) else {
        let payload = json!({ "error": "resident id must not be blank" });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let state = ResolutionState::from(service.resolve_outstanding_requests(&applicant).await);
    let status = match state {
        ResolutionState::Failed { .. } => StatusCode::SERVICE_UNAVAILABLE,
        ResolutionState::Ready { .. } | ResolutionState::Loading => StatusCode::OK,
    };

    (status, axum::Json(state)).into_response()
}
