//! Survey intake, risk scoring, and recommendation workflow.
//!
//! The service stitches the capture parsers, the scan pipeline, the scoring
//! engine, and the recommendation planner into one pipeline; the router puts
//! an HTTP surface in front of it.

pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AlcoholUse, CholesterolLevel, DetailedRiskAssessment, DietInput, DietQuality, ExerciseLevel,
    FactorCategory, HealthFactor, LevelGuidance, ParsedAnswers, RiskAssessment, RiskBreakdown,
    RiskLevel, Severity, StressLevel, SurveyAnswers,
};
pub use router::assessment_router;
pub use service::{
    AssessmentError, AssessmentService, ImageAnalysis, ImageSubmission, RecommendationRequest,
    RiskAssessmentRequest, RiskReport, ServiceConfig, TextAnalysis, TextAnalysisRequest,
};
