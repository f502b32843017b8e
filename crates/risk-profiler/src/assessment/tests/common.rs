use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    DietInput, DietQuality, ExerciseLevel, RiskAssessment, SurveyAnswers,
};
use crate::assessment::router::assessment_router;
use crate::assessment::service::{AssessmentService, ImageSubmission, ServiceConfig};
use crate::metrics::InMemoryMetrics;
use crate::ocr::{OcrEngine, OcrError, OcrRequest, OcrResult};
use crate::scoring::{RiskEngine, ScoringConfig};

pub(super) const SCOREABLE_JSON: &str = r#"{
    "age": 44,
    "smoker": true,
    "exercise": "rarely",
    "diet": "fair",
    "alcohol": "socially",
    "sleep": 6,
    "stress": "high"
}"#;

pub(super) const READABLE_FORM: &str =
    "Age: 35\nSmoker: No\nExercise: regularly\nDiet: good\nSleep: 7 hours\nStress: low";

pub(super) fn high_risk_answers() -> SurveyAnswers {
    SurveyAnswers {
        age: Some(70),
        smoker: Some(true),
        exercise: Some(ExerciseLevel::Never),
        diet: Some(DietInput::Rated(DietQuality::Poor)),
        ..SurveyAnswers::default()
    }
}

pub(super) fn high_risk_assessment() -> RiskAssessment {
    RiskEngine::new(ScoringConfig::default()).score(&high_risk_answers())
}

pub(super) fn image_submission() -> ImageSubmission {
    ImageSubmission {
        image_data: "aGVhbHRoIHN1cnZleQ==".to_string(),
        filename: "survey.png".to_string(),
        mime_type: "image/png".to_string(),
    }
}

pub(super) fn readable_scan(confidence: f64) -> OcrResult {
    OcrResult {
        extracted_text: READABLE_FORM.to_string(),
        confidence,
        processing_time: 1800,
        success: true,
        error: None,
    }
}

pub(super) fn garbled_scan() -> OcrResult {
    OcrResult {
        extracted_text: "meaningless blur".to_string(),
        confidence: 0.2,
        processing_time: 2100,
        success: true,
        error: None,
    }
}

#[derive(Default)]
pub(super) struct ScriptedOcr {
    scans: Mutex<Vec<OcrResult>>,
}

impl ScriptedOcr {
    pub(super) fn returning(scans: Vec<OcrResult>) -> Self {
        Self {
            scans: Mutex::new(scans),
        }
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcr {
    async fn recognize(&self, _request: &OcrRequest) -> Result<OcrResult, OcrError> {
        let mut scans = self.scans.lock().expect("scan script mutex poisoned");
        if scans.is_empty() {
            return Err(OcrError::Unavailable("scan script exhausted".to_string()));
        }
        Ok(scans.remove(0))
    }
}

pub(super) struct UnavailableOcr;

#[async_trait]
impl OcrEngine for UnavailableOcr {
    async fn recognize(&self, _request: &OcrRequest) -> Result<OcrResult, OcrError> {
        Err(OcrError::Unavailable("scanner offline".to_string()))
    }

    fn ready(&self) -> bool {
        false
    }
}

pub(super) fn build_service(
    scans: Vec<OcrResult>,
) -> (
    AssessmentService<ScriptedOcr, InMemoryMetrics>,
    Arc<InMemoryMetrics>,
) {
    build_service_with_config(scans, ServiceConfig::default())
}

pub(super) fn build_service_with_config(
    scans: Vec<OcrResult>,
    config: ServiceConfig,
) -> (
    AssessmentService<ScriptedOcr, InMemoryMetrics>,
    Arc<InMemoryMetrics>,
) {
    let ocr = Arc::new(ScriptedOcr::returning(scans));
    let metrics = Arc::new(InMemoryMetrics::new());
    let service = AssessmentService::new(ocr, metrics.clone(), config);
    (service, metrics)
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<ScriptedOcr, InMemoryMetrics>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
