use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use risk_profiler::assessment::{AssessmentService, ServiceConfig};
use risk_profiler::error::AppError;
use risk_profiler::metrics::InMemoryMetrics;
use risk_profiler::ocr::MockOcrEngine;
use risk_profiler::{telemetry, AppConfig};
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, TtlCache, HEALTH_CACHE_TTL};
use crate::routes::{cors_layer, with_assessment_routes};

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
    let readiness_flag = Arc::new(AtomicBool::new(false));

    let engine = Arc::new(MockOcrEngine::new());
    let sink = Arc::new(InMemoryMetrics::new());
    let service = Arc::new(AssessmentService::new(
        engine.clone(),
        sink.clone(),
        ServiceConfig::from_app(&config),
    ));

    let app_state = AppState {
        readiness: readiness_flag.clone(),
        prometheus: Arc::new(prometheus_handle),
        sink,
        ocr: engine,
        health_cache: Arc::new(TtlCache::new(HEALTH_CACHE_TTL)),
        started_at: Instant::now(),
        environment: config.environment.label(),
    };

    let app = with_assessment_routes(service)
        .layer(Extension(app_state))
        .layer(cors_layer())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(AppError::Server)?;
    readiness_flag.store(true, Ordering::Release);

    info!(environment = config.environment.label(), %addr, "health risk profiler api ready");

    axum::serve(listener, app)
        .await
        .map_err(AppError::Server)?;
    Ok(())
}
