use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::{SecondsFormat, Utc};
use risk_profiler::assessment::{assessment_router, AssessmentService};
use risk_profiler::metrics::{MetricEvent, MetricsSink};
use risk_profiler::ocr::OcrEngine;
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::infra::AppState;

const SERVICE_NAME: &str = "Health Risk Profiler API";

/// Probe latency above this is reported as degraded.
const SLOW_PROBE_MS: u64 = 2000;

/// Mounts the assessment endpoints plus the operational surface: the JSON
/// health and usage reports the clients poll, and the plain probes the
/// deployment layer scrapes.
pub(crate) fn with_assessment_routes<O, M>(service: Arc<AssessmentService<O, M>>) -> axum::Router
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    assessment_router(service)
        .route("/api/health-check", axum::routing::get(health_check_endpoint))
        .route(
            "/api/metrics",
            axum::routing::get(metrics_report_endpoint).post(record_metric_endpoint),
        )
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(prometheus_endpoint))
}

/// Browser clients call the API from another origin, so every route answers
/// preflights permissively.
pub(crate) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ServiceProbes {
    pub(crate) api: HealthState,
    pub(crate) ocr: HealthState,
    pub(crate) response_time: u64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SystemInfo {
    pub(crate) platform: &'static str,
    pub(crate) arch: &'static str,
}

/// Full health verdict served by `GET /api/health-check`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HealthReport {
    pub(crate) status: HealthState,
    pub(crate) timestamp: String,
    pub(crate) service: &'static str,
    pub(crate) version: &'static str,
    pub(crate) uptime: u64,
    pub(crate) services: ServiceProbes,
    pub(crate) environment: &'static str,
    pub(crate) system: SystemInfo,
    pub(crate) endpoints: Value,
}

impl HealthReport {
    fn http_status(&self) -> StatusCode {
        match self.status {
            HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            HealthState::Healthy | HealthState::Degraded => StatusCode::OK,
        }
    }
}

fn endpoint_directory() -> Value {
    json!({
        "POST /api/analyze-text": "Parse text or JSON survey responses",
        "POST /api/analyze-image": "Extract text from images using OCR",
        "POST /api/risk-assessment": "Calculate health risk scores",
        "POST /api/recommendations": "Generate personalized recommendations",
        "GET /api/health-check": "System health status",
    })
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) async fn health_check_endpoint(Extension(state): Extension<AppState>) -> Response {
    let probe_started = Instant::now();

    if let Some(report) = state.health_cache.get() {
        return (report.http_status(), Json(report)).into_response();
    }

    let ocr = if state.ocr.ready() {
        HealthState::Healthy
    } else {
        HealthState::Unhealthy
    };
    let response_time = probe_started.elapsed().as_millis() as u64;

    let status = if ocr == HealthState::Unhealthy {
        HealthState::Unhealthy
    } else if response_time > SLOW_PROBE_MS {
        HealthState::Degraded
    } else {
        HealthState::Healthy
    };

    let report = HealthReport {
        status,
        timestamp: timestamp(),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        services: ServiceProbes {
            api: HealthState::Healthy,
            ocr,
            response_time,
        },
        environment: state.environment,
        system: SystemInfo {
            platform: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        },
        endpoints: endpoint_directory(),
    };

    state.health_cache.put(report.clone());
    (report.http_status(), Json(report)).into_response()
}

#[derive(Debug, Serialize)]
pub(crate) struct MetricsReport {
    timestamp: String,
    performance: PerformanceBlock,
    usage: UsageBlock,
    health: HealthBlock,
}

#[derive(Debug, Serialize)]
struct PerformanceBlock {
    uptime_seconds: u64,
    response_times: ResponseTimeBlock,
}

#[derive(Debug, Serialize)]
struct ResponseTimeBlock {
    avg_ms: u64,
    samples: usize,
}

#[derive(Debug, Serialize)]
struct UsageBlock {
    api_calls_total: u64,
    ocr_processing_total: u64,
    errors_total: u64,
}

#[derive(Debug, Serialize)]
struct HealthBlock {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
}

pub(crate) async fn metrics_report_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<MetricsReport> {
    let snapshot = state.sink.snapshot();

    Json(MetricsReport {
        timestamp: timestamp(),
        performance: PerformanceBlock {
            uptime_seconds: state.started_at.elapsed().as_secs(),
            response_times: ResponseTimeBlock {
                avg_ms: snapshot.response_times.avg_ms,
                samples: snapshot.response_times.samples,
            },
        },
        usage: UsageBlock {
            api_calls_total: snapshot.api_calls_total,
            ocr_processing_total: snapshot.ocr_processing_total,
            errors_total: snapshot.errors_total,
        },
        health: HealthBlock {
            status: "healthy",
            last_error: snapshot.last_error,
        },
    })
}

pub(crate) async fn record_metric_endpoint(
    Extension(state): Extension<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let metric = body.get("metric").and_then(Value::as_str);
    let value = body.get("value").and_then(Value::as_f64);
    let (Some(metric), Some(value)) = (metric, value) else {
        let payload = json!({
            "error": "Invalid metric data. Required: metric (string), value (number)",
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };

    let message = body
        .pointer("/tags/message")
        .and_then(Value::as_str)
        .map(str::to_string);

    // Unknown metric names are acknowledged but not stored.
    if let Some(event) = MetricEvent::from_name(metric, value.round() as u64, message) {
        state.sink.record(event);
    }

    let payload = json!({
        "success": true,
        "timestamp": timestamp(),
        "metric": metric,
        "value": body.get("value"),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn healthcheck() -> Json<Value> {
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

pub(crate) async fn prometheus_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.prometheus.render(),
    )
}
