use std::sync::Arc;

use mime::Mime;
use serde::{Deserialize, Serialize};

use crate::assessment::domain::{
    DetailedRiskAssessment, ParsedAnswers, RiskAssessment, SurveyAnswers,
};
use crate::config::{
    AppConfig, DEFAULT_OCR_CONFIDENCE_THRESHOLD, DEFAULT_OCR_MAX_ATTEMPTS,
    DEFAULT_UPLOAD_MAX_BYTES,
};
use crate::intake::{self, InputFormat};
use crate::metrics::{MetricEvent, MetricsSink};
use crate::ocr::{recognize_enhanced, EnhancedOcrResult, OcrEngine, OcrRequest};
use crate::recommend::{self, RecommendationsWithSummary, UserPreferences};
use crate::scoring::{RiskEngine, ScoringConfig};
use crate::validation;

/// Runtime knobs for the assessment pipeline.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub scoring: ScoringConfig,
    pub ocr_confidence_threshold: u8,
    pub ocr_max_attempts: u32,
    pub upload_max_bytes: usize,
}

impl ServiceConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            scoring: ScoringConfig::default(),
            ocr_confidence_threshold: config.ocr.confidence_threshold,
            ocr_max_attempts: config.ocr.max_attempts,
            upload_max_bytes: config.upload.max_bytes,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            ocr_confidence_threshold: DEFAULT_OCR_CONFIDENCE_THRESHOLD,
            ocr_max_attempts: DEFAULT_OCR_MAX_ATTEMPTS,
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }
}

/// Body of `POST /api/analyze-text`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextAnalysisRequest {
    pub text: String,
    pub format: InputFormat,
}

/// Body of `POST /api/analyze-image`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSubmission {
    pub image_data: String,
    pub filename: String,
    pub mime_type: String,
}

/// Body of `POST /api/risk-assessment`.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskAssessmentRequest {
    pub answers: SurveyAnswers,
    #[serde(default = "default_include_factors")]
    pub include_factors: bool,
}

fn default_include_factors() -> bool {
    true
}

/// Body of `POST /api/recommendations`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    pub risk_assessment: RiskAssessment,
    #[serde(default)]
    pub user_preferences: Option<UserPreferences>,
}

/// Outcome of text intake: a scoreable capture, or guidance for
/// resubmission when the capture is too sparse to assess.
#[derive(Debug, Clone, PartialEq)]
pub enum TextAnalysis {
    Parsed(ParsedAnswers),
    Incomplete {
        reason: String,
        suggestions: Vec<String>,
        data: ParsedAnswers,
    },
}

/// Accepted scan paired with the answers recovered from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageAnalysis {
    pub ocr_result: EnhancedOcrResult,
    pub parsed_data: ParsedAnswers,
}

/// Assessment payload in whichever shape the caller asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RiskReport {
    Basic(RiskAssessment),
    Detailed(Box<DetailedRiskAssessment>),
}

/// Service composing intake parsing, the scan pipeline, the scoring
/// engine, and recommendation planning.
pub struct AssessmentService<O, M> {
    ocr: Arc<O>,
    metrics: Arc<M>,
    engine: RiskEngine,
    config: ServiceConfig,
}

impl<O, M> AssessmentService<O, M>
where
    O: OcrEngine + 'static,
    M: MetricsSink + 'static,
{
    pub fn new(ocr: Arc<O>, metrics: Arc<M>, config: ServiceConfig) -> Self {
        let engine = RiskEngine::new(config.scoring);
        Self {
            ocr,
            metrics,
            engine,
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Parse a raw text or JSON capture into survey answers.
    pub fn analyze_text(
        &self,
        request: TextAnalysisRequest,
    ) -> Result<TextAnalysis, AssessmentError> {
        self.metrics.record(MetricEvent::ApiCall(1));

        if request.text.is_empty() {
            return Err(self.invalid_request("Text input is required"));
        }

        let parsed = intake::parse_input(&request.text, request.format).map_err(|err| {
            self.fail(AssessmentError::InvalidInput {
                details: err.to_string(),
            })
        })?;

        match validation::validate_parsed(&parsed) {
            Ok(()) => Ok(TextAnalysis::Parsed(parsed)),
            Err(profile) => Ok(TextAnalysis::Incomplete {
                reason: profile.reason,
                suggestions: profile.suggestions,
                data: parsed,
            }),
        }
    }

    /// Run the scan pipeline over an uploaded image and parse whatever
    /// text survives it.
    pub async fn analyze_image(
        &self,
        submission: ImageSubmission,
    ) -> Result<ImageAnalysis, AssessmentError> {
        self.metrics.record(MetricEvent::ApiCall(1));

        if !supported_image_type(&submission.mime_type) {
            return Err(self.fail(AssessmentError::InvalidFileType));
        }
        if estimated_decoded_len(&submission.image_data) > self.config.upload_max_bytes {
            return Err(self.fail(AssessmentError::FileTooLarge));
        }

        let request = OcrRequest {
            image_data: submission.image_data,
            filename: submission.filename,
            confidence_threshold: self.config.ocr_confidence_threshold,
            preprocessing: true,
        };
        let outcome =
            recognize_enhanced(self.ocr.as_ref(), &request, self.config.ocr_max_attempts).await;
        self.metrics.record(MetricEvent::OcrProcessing(1));

        if !outcome.success {
            return Err(self.fail(AssessmentError::OcrRejected(Box::new(outcome))));
        }

        let parsed_data = intake::parse_ocr_result(&outcome.as_result());
        Ok(ImageAnalysis {
            ocr_result: outcome,
            parsed_data,
        })
    }

    /// Score pre-built survey answers, with the per-category breakdown
    /// unless the caller opts out.
    pub fn assess_risk(
        &self,
        request: RiskAssessmentRequest,
    ) -> Result<RiskReport, AssessmentError> {
        self.metrics.record(MetricEvent::ApiCall(1));

        if let Err(violation) = intake::validate_bounds(&request.answers) {
            return Err(self.fail(AssessmentError::InvalidRequest {
                details: violation.to_string(),
            }));
        }

        let report = if request.include_factors {
            RiskReport::Detailed(Box::new(self.engine.detailed(&request.answers)))
        } else {
            RiskReport::Basic(self.engine.score(&request.answers))
        };
        Ok(report)
    }

    /// Build the prioritized recommendation plan for an assessment.
    pub fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationsWithSummary, AssessmentError> {
        self.metrics.record(MetricEvent::ApiCall(1));

        let assessment = request.risk_assessment;
        if assessment.score > 100 || !(0.0..=1.0).contains(&assessment.confidence) {
            return Err(self.fail(AssessmentError::InvalidRequest {
                details: "risk assessment score or confidence out of range".to_string(),
            }));
        }

        let set = recommend::generate(&assessment, request.user_preferences.as_ref());
        Ok(RecommendationsWithSummary::from_set(set))
    }

    /// Record a request the handler could not decode and hand back the
    /// matching error.
    pub(crate) fn invalid_request(&self, details: impl Into<String>) -> AssessmentError {
        self.fail(AssessmentError::InvalidRequest {
            details: details.into(),
        })
    }

    fn fail(&self, error: AssessmentError) -> AssessmentError {
        self.metrics.record(MetricEvent::Error {
            count: 1,
            message: Some(error.to_string()),
        });
        error
    }
}

fn supported_image_type(raw: &str) -> bool {
    let Ok(parsed) = raw.parse::<Mime>() else {
        return false;
    };
    parsed.type_() == mime::IMAGE
        && matches!(
            parsed.subtype().as_str(),
            "jpeg" | "jpg" | "png" | "gif" | "webp"
        )
}

// Uploads arrive base64 encoded, so the decoded size is three quarters
// of the wire length.
fn estimated_decoded_len(image_data: &str) -> usize {
    image_data.len() * 3 / 4
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Invalid request format")]
    InvalidRequest { details: String },
    #[error("Invalid input format. Please check your data and try again.")]
    InvalidInput { details: String },
    #[error("Invalid file type. Please upload a PNG, JPG, or PDF file.")]
    InvalidFileType,
    #[error("File size too large. Please upload an image smaller than 5MB.")]
    FileTooLarge,
    /// Every scan attempt fell below the confidence and validation bars.
    #[error("Unable to extract text from the uploaded image. Please try a clearer image or enter data manually.")]
    OcrRejected(Box<EnhancedOcrResult>),
}
