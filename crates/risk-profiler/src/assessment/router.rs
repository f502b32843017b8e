use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::service::{
    AssessmentError, AssessmentService, ImageSubmission, RecommendationRequest,
    RiskAssessmentRequest, TextAnalysis, TextAnalysisRequest,
};
use crate::metrics::MetricsSink;
use crate::ocr::OcrEngine;

/// Router builder exposing the HTTP intake and assessment endpoints.
pub fn assessment_router<O, M>(service: Arc<AssessmentService<O, M>>) -> Router
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    Router::new()
        .route("/api/analyze-text", post(analyze_text_handler::<O, M>))
        .route("/api/analyze-image", post(analyze_image_handler::<O, M>))
        .route(
            "/api/risk-assessment",
            post(risk_assessment_handler::<O, M>),
        )
        .route(
            "/api/recommendations",
            post(recommendations_handler::<O, M>),
        )
        .with_state(service)
}

pub(crate) async fn analyze_text_handler<O, M>(
    State(service): State<Arc<AssessmentService<O, M>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    let request: TextAnalysisRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => return error_response(&service.invalid_request(err.to_string())),
    };

    match service.analyze_text(request) {
        Ok(TextAnalysis::Parsed(parsed)) => success(parsed),
        Ok(TextAnalysis::Incomplete {
            reason,
            suggestions,
            data,
        }) => {
            let payload = json!({
                "status": "incomplete_profile",
                "reason": reason,
                "suggestions": suggestions,
                "data": data,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn analyze_image_handler<O, M>(
    State(service): State<Arc<AssessmentService<O, M>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    let submission: ImageSubmission = match serde_json::from_value(body) {
        Ok(submission) => submission,
        Err(err) => return error_response(&service.invalid_request(err.to_string())),
    };

    match service.analyze_image(submission).await {
        Ok(analysis) => success(analysis),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn risk_assessment_handler<O, M>(
    State(service): State<Arc<AssessmentService<O, M>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    let request: RiskAssessmentRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => return error_response(&service.invalid_request(err.to_string())),
    };

    match service.assess_risk(request) {
        Ok(report) => success(report),
        Err(error) => error_response(&error),
    }
}

pub(crate) async fn recommendations_handler<O, M>(
    State(service): State<Arc<AssessmentService<O, M>>>,
    axum::Json(body): axum::Json<Value>,
) -> Response
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    let request: RecommendationRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => return error_response(&service.invalid_request(err.to_string())),
    };

    match service.recommend(request) {
        Ok(plan) => success(plan),
        Err(error) => error_response(&error),
    }
}

fn success<T: Serialize>(data: T) -> Response {
    let payload = json!({
        "status": "success",
        "data": data,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: &AssessmentError) -> Response {
    match error {
        AssessmentError::InvalidRequest { details }
        | AssessmentError::InvalidInput { details } => {
            let payload = json!({
                "status": "error",
                "error": error.to_string(),
                "details": details,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        AssessmentError::InvalidFileType | AssessmentError::FileTooLarge => {
            let payload = json!({
                "status": "error",
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        AssessmentError::OcrRejected(outcome) => {
            let payload = json!({
                "status": "error",
                "error": error.to_string(),
                "data": {
                    "ocr_result": outcome,
                    "attempts": outcome.attempts,
                    "confidence": outcome.confidence,
                },
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
