//! Integration coverage for the survey-to-recommendation pipeline.
//!
//! Scenarios run end to end through the public service facade and the HTTP
//! router, using the mock scan engine, so intake, scoring, and planning are
//! exercised together without reaching into private modules.

mod common {
    use std::sync::Arc;

    use risk_profiler::assessment::{AssessmentService, ServiceConfig};
    use risk_profiler::metrics::InMemoryMetrics;
    use risk_profiler::ocr::MockOcrEngine;

    pub(super) const HIGH_RISK_TEXT: &str = "Age: 70, Smoker: yes, Exercise: never, Diet: poor";

    pub(super) fn build_service() -> (
        AssessmentService<MockOcrEngine, InMemoryMetrics>,
        Arc<InMemoryMetrics>,
    ) {
        build_service_with_config(ServiceConfig::default())
    }

    pub(super) fn build_service_with_config(
        config: ServiceConfig,
    ) -> (
        AssessmentService<MockOcrEngine, InMemoryMetrics>,
        Arc<InMemoryMetrics>,
    ) {
        let metrics = Arc::new(InMemoryMetrics::new());
        let engine = Arc::new(MockOcrEngine::with_latency(0, 0));
        let service = AssessmentService::new(engine, metrics.clone(), config);
        (service, metrics)
    }
}

mod survey_pipeline {
    use super::common::*;
    use risk_profiler::assessment::{
        AssessmentError, RecommendationRequest, RiskAssessmentRequest, RiskLevel, RiskReport,
        TextAnalysis, TextAnalysisRequest,
    };
    use risk_profiler::intake::InputFormat;
    use risk_profiler::metrics::MetricsSink;
    use risk_profiler::recommend::RecommendationCategory;

    #[test]
    fn high_risk_text_flows_through_scoring_to_recommendations() {
        let (service, metrics) = build_service();

        let outcome = service
            .analyze_text(TextAnalysisRequest {
                text: HIGH_RISK_TEXT.to_string(),
                format: InputFormat::Text,
            })
            .expect("capture parses");
        let parsed = match outcome {
            TextAnalysis::Parsed(parsed) => parsed,
            other => panic!("expected parsed capture, got {other:?}"),
        };
        assert_eq!(parsed.answers.age, Some(70));
        assert!(parsed.missing_fields.is_empty());

        let report = service
            .assess_risk(RiskAssessmentRequest {
                answers: parsed.answers,
                include_factors: false,
            })
            .expect("assessment succeeds");
        let assessment = match report {
            RiskReport::Basic(assessment) => assessment,
            other => panic!("expected basic report, got {other:?}"),
        };
        assert_eq!(assessment.score, 99);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.contributing_factors.len(), 4);

        let plan = service
            .recommend(RecommendationRequest {
                risk_assessment: assessment,
                user_preferences: None,
            })
            .expect("plan builds");
        assert_eq!(plan.recommendations.len(), 8);
        assert_eq!(plan.summary.high_priority_count, 8);
        assert_eq!(
            plan.summary.primary_focus_areas.first(),
            Some(&RecommendationCategory::Medical)
        );
        assert_eq!(plan.status, "ok");
        assert!(plan
            .disclaimer
            .contains("informational and wellness purposes"));

        assert_eq!(metrics.snapshot().api_calls_total, 3);
        assert_eq!(metrics.snapshot().errors_total, 0);
    }

    #[test]
    fn detailed_report_breaks_down_score_contributions() {
        let (service, _metrics) = build_service();

        let outcome = service
            .analyze_text(TextAnalysisRequest {
                text: HIGH_RISK_TEXT.to_string(),
                format: InputFormat::Text,
            })
            .expect("capture parses");
        let parsed = match outcome {
            TextAnalysis::Parsed(parsed) => parsed,
            other => panic!("expected parsed capture, got {other:?}"),
        };

        let report = service
            .assess_risk(RiskAssessmentRequest {
                answers: parsed.answers,
                include_factors: true,
            })
            .expect("assessment succeeds");
        let detailed = match report {
            RiskReport::Detailed(detailed) => detailed,
            other => panic!("expected detailed report, got {other:?}"),
        };

        assert_eq!(detailed.score, 100);
        assert_eq!(detailed.risk_level, RiskLevel::High);
        assert_eq!(detailed.risk_breakdown.lifestyle_score, 60);
        assert_eq!(detailed.risk_breakdown.demographic_score, 30);
        assert_eq!(detailed.factor_interactions.compound_risk, 16);
        assert_eq!(detailed.improvement_potential, 61);
    }

    #[test]
    fn whitespace_capture_is_reported_as_incomplete() {
        let (service, _metrics) = build_service();

        let outcome = service
            .analyze_text(TextAnalysisRequest {
                text: "   \n ".to_string(),
                format: InputFormat::Text,
            })
            .expect("whitespace still flows through parsing");

        match outcome {
            TextAnalysis::Incomplete { reason, data, .. } => {
                assert_eq!(reason, "Data quality is too low for reliable assessment");
                assert_eq!(
                    data.missing_fields,
                    vec!["age", "smoker", "exercise", "diet"]
                );
            }
            other => panic!("expected incomplete profile, got {other:?}"),
        }
    }

    #[test]
    fn structured_capture_enforces_answer_bounds() {
        let (service, metrics) = build_service();

        let error = service
            .analyze_text(TextAnalysisRequest {
                text: r#"{"age": 200}"#.to_string(),
                format: InputFormat::Json,
            })
            .expect_err("out of range age must be rejected");

        match error {
            AssessmentError::InvalidInput { details } => {
                assert_eq!(details, "JSON parsing failed: Invalid JSON structure");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
        assert_eq!(metrics.snapshot().errors_total, 1);
    }
}

mod scan_pipeline {
    use super::common::*;
    use risk_profiler::assessment::{AssessmentError, ImageSubmission, ServiceConfig};
    use risk_profiler::metrics::MetricsSink;

    fn submission() -> ImageSubmission {
        ImageSubmission {
            image_data: "aGVhbHRoIHN1cnZleSBmb3Jt".to_string(),
            filename: "survey.png".to_string(),
            mime_type: "image/png".to_string(),
        }
    }

    #[tokio::test]
    async fn mock_scan_parses_into_survey_answers() {
        let (service, metrics) = build_service();

        let analysis = service
            .analyze_image(submission())
            .await
            .expect("mock scans clear the default threshold");

        assert!(analysis.ocr_result.success);
        assert_eq!(analysis.ocr_result.attempts, 1);
        assert!(analysis.ocr_result.confidence >= 0.5);
        // Every sample form carries an age line.
        assert!(analysis.parsed_data.answers.age.is_some());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.api_calls_total, 1);
        assert_eq!(snapshot.ocr_processing_total, 1);
        assert_eq!(snapshot.errors_total, 0);
    }

    #[tokio::test]
    async fn unreachable_threshold_exhausts_the_retry_budget() {
        let (service, metrics) = build_service_with_config(ServiceConfig {
            ocr_confidence_threshold: 100,
            ocr_max_attempts: 2,
            ..ServiceConfig::default()
        });

        let error = service
            .analyze_image(submission())
            .await
            .expect_err("no mock scan reaches full confidence");

        let outcome = match error {
            AssessmentError::OcrRejected(outcome) => outcome,
            other => panic!("expected rejected scan, got {other:?}"),
        };
        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome
            .error
            .as_deref()
            .unwrap_or_default()
            .ends_with("below threshold (100%)"));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.ocr_processing_total, 1);
        assert_eq!(snapshot.errors_total, 1);
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::common::*;
    use risk_profiler::assessment::assessment_router;

    fn build_router() -> axum::Router {
        let (service, _metrics) = build_service();
        assessment_router(Arc::new(service))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("serialize")))
            .expect("request")
    }

    async fn payload(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn text_endpoint_serves_the_parsed_capture() {
        let response = build_router()
            .oneshot(post_json(
                "/api/analyze-text",
                &json!({"text": HIGH_RISK_TEXT, "format": "text"}),
            ))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = payload(response).await;
        assert_eq!(payload.get("status"), Some(&json!("success")));
        assert_eq!(payload.pointer("/data/answers/age"), Some(&json!(70)));
    }

    #[tokio::test]
    async fn image_endpoint_serves_scan_and_parse_together() {
        let body = json!({
            "imageData": "aGVhbHRoIHN1cnZleSBmb3Jt",
            "filename": "survey.png",
            "mimeType": "image/png",
        });
        let response = build_router()
            .oneshot(post_json("/api/analyze-image", &body))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = payload(response).await;
        assert_eq!(
            payload.pointer("/data/ocr_result/success"),
            Some(&json!(true))
        );
        assert!(payload
            .pointer("/data/parsed_data/answers/age")
            .and_then(Value::as_u64)
            .is_some());
    }

    #[tokio::test]
    async fn risk_endpoint_defaults_to_the_detailed_report() {
        let body = json!({
            "answers": {"age": 70, "smoker": true, "exercise": "never", "diet": "poor"},
        });
        let response = build_router()
            .oneshot(post_json("/api/risk-assessment", &body))
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = payload(response).await;
        assert_eq!(payload.pointer("/data/score"), Some(&json!(100)));
        assert_eq!(
            payload.pointer("/data/factor_interactions/compoundRisk"),
            Some(&json!(16))
        );
    }
}
