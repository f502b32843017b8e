//! Heuristic checks that OCR output actually looks like a health survey.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::OcrResult;

const HEALTH_KEYWORDS: [&str; 15] = [
    "age",
    "smoker",
    "smoking",
    "exercise",
    "diet",
    "weight",
    "height",
    "alcohol",
    "stress",
    "sleep",
    "medical",
    "health",
    "blood pressure",
    "cholesterol",
    "diabetes",
];

fn pattern(raw: &str) -> Regex {
    Regex::new(raw).expect("preview pattern compiles")
}

static AGE_PREVIEW: LazyLock<Regex> = LazyLock::new(|| pattern(r"age[:\s]*(\d+)"));
static SMOKER_PREVIEW: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"smok(?:er?|ing)[:\s]*(\w+)"));
static EXERCISE_PREVIEW: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"exercise[:\s]*([^\n,;.]+)"));
static DIET_PREVIEW: LazyLock<Regex> = LazyLock::new(|| pattern(r"diet[:\s]*([^\n,;.]+)"));

/// Field glimpse surfaced to clients before full parsing runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldPreview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
}

impl FieldPreview {
    fn populated(&self) -> usize {
        [
            self.age.is_some(),
            self.smoker.is_some(),
            self.exercise.is_some(),
            self.diet.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}

/// Outcome of the health-form heuristics for a single scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrValidation {
    pub is_valid: bool,
    pub confidence: f64,
    pub suggestions: Vec<String>,
    pub extracted_fields: FieldPreview,
}

/// Scores a scan by blending raw OCR confidence with how many health-survey
/// keywords the text contains, and previews the core fields.
pub fn validate_ocr(result: &OcrResult) -> OcrValidation {
    if !result.success {
        return OcrValidation {
            is_valid: false,
            confidence: 0.0,
            suggestions: vec![
                "Try uploading a clearer image".to_string(),
                "Ensure the document is well-lit".to_string(),
                "Make sure text is not rotated or skewed".to_string(),
                "Consider manual entry instead".to_string(),
            ],
            extracted_fields: FieldPreview::default(),
        };
    }

    let text = result.extracted_text.to_lowercase();

    let found_keywords = HEALTH_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(**keyword))
        .count();
    let keyword_score = found_keywords as f64 / HEALTH_KEYWORDS.len() as f64;
    let confidence = (result.confidence + keyword_score) / 2.0;

    let extracted_fields = FieldPreview {
        age: AGE_PREVIEW
            .captures(&text)
            .and_then(|caps| caps[1].parse().ok()),
        smoker: SMOKER_PREVIEW.captures(&text).map(|caps| caps[1].to_string()),
        exercise: EXERCISE_PREVIEW
            .captures(&text)
            .map(|caps| caps[1].trim().to_string()),
        diet: DIET_PREVIEW
            .captures(&text)
            .map(|caps| caps[1].trim().to_string()),
    };

    let mut suggestions = Vec::new();
    if confidence < 0.7 {
        suggestions.push("OCR confidence is low - consider manual entry".to_string());
    }
    if found_keywords < 3 {
        suggestions.push(
            "Few health-related terms detected - ensure this is a health survey form".to_string(),
        );
    }
    if extracted_fields.populated() < 2 {
        suggestions.push("Limited data extracted - try a higher quality image".to_string());
    }

    OcrValidation {
        is_valid: confidence >= 0.5 && found_keywords >= 2,
        confidence,
        suggestions,
        extracted_fields,
    }
}
