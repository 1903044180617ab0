use crate::cli::ServeArgs;
use crate::infra::{load_configured_store, AppState};
use crate::routes::with_document_request_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use document_requests::config::AppConfig;
use document_requests::display::DisplayFormatter;
use document_requests::error::AppError;
use document_requests::requests::OutstandingRequestsService;
use document_requests::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        display: DisplayFormatter::new(config.display.time_zone),
    };

    let store = Arc::new(load_configured_store(&config.store).await?);
    let service = Arc::new(OutstandingRequestsService::new(store));

    let app = with_document_request_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        time_zone = config.display.time_zone.name(),
        "document request resolver ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
