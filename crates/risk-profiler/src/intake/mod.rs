//! Survey intake. Free text, structured JSON, and scanned documents all
//! funnel into the same [`ParsedAnswers`] shape.

pub mod json;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::assessment::domain::{ParsedAnswers, SurveyAnswers};
use crate::ocr::OcrResult;
use crate::validation::CORE_FIELDS;

pub use json::{parse_json_input, validate_bounds, BoundsViolation};
pub use text::parse_text_input;

/// Declared format of a text capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parsing failed: {0}")]
    Malformed(String),
    #[error("JSON parsing failed: Invalid JSON structure")]
    InvalidStructure,
}

/// Parses a capture according to its declared format. Text never fails
/// outright; an unreadable capture simply comes back empty with every core
/// field missing.
pub fn parse_input(input: &str, format: InputFormat) -> Result<ParsedAnswers, ParseError> {
    match format {
        InputFormat::Json => json::parse_json_input(input),
        InputFormat::Text => Ok(text::parse_text_input(input)),
    }
}

/// Runs text extraction over a recognized document. The recognition
/// confidence discounts the usual free-text extraction quality, so a shaky
/// scan yields proportionally lower confidence than typed text.
pub fn parse_ocr_result(ocr: &OcrResult) -> ParsedAnswers {
    if !ocr.success || ocr.extracted_text.is_empty() {
        return ParsedAnswers {
            answers: SurveyAnswers::default(),
            missing_fields: CORE_FIELDS.iter().map(|field| field.to_string()).collect(),
            confidence: 0.0,
        };
    }

    let quality = ocr.confidence * 0.8;
    let mut parsed = text::parse_text_input(&ocr.extracted_text);
    parsed.confidence *= quality;
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognized(text: &str, confidence: f64) -> OcrResult {
        OcrResult {
            extracted_text: text.to_string(),
            confidence,
            processing_time: 1200,
            success: true,
            error: None,
        }
    }

    #[test]
    fn format_dispatch_routes_to_the_right_parser() {
        let text = parse_input("age: 50, smoker: yes", InputFormat::Text)
            .expect("text never fails");
        assert_eq!(text.answers.age, Some(50));

        let json = parse_input(r#"{"age": 50}"#, InputFormat::Json).expect("json parses");
        assert_eq!(json.confidence, 0.0);
    }

    #[test]
    fn failed_recognition_yields_the_empty_capture() {
        let failed = OcrResult {
            extracted_text: String::new(),
            confidence: 0.0,
            processing_time: 900,
            success: false,
            error: Some("below threshold".to_string()),
        };

        let parsed = parse_ocr_result(&failed);
        assert_eq!(parsed.answers, SurveyAnswers::default());
        assert_eq!(parsed.missing_fields, vec!["age", "smoker", "exercise", "diet"]);
        assert_eq!(parsed.confidence, 0.0);
    }

    #[test]
    fn recognition_confidence_discounts_text_confidence() {
        let text = "Age: 35, Non-smoker, exercise regularly, diet is excellent";
        let direct = parse_text_input(text);
        let scanned = parse_ocr_result(&recognized(text, 0.9));

        let expected = direct.confidence * (0.9 * 0.8);
        assert!((scanned.confidence - expected).abs() < 1e-9);
        assert_eq!(scanned.answers, direct.answers);
    }
}
