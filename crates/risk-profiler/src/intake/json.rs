//! Structured JSON captures.

use serde_json::error::Category;

use super::ParseError;
use crate::assessment::domain::{ParsedAnswers, SurveyAnswers};
use crate::validation::{confidence_score, survey_completeness};

/// A survey answer outside the range the schema allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsViolation {
    pub field: &'static str,
    pub requirement: &'static str,
}

impl std::fmt::Display for BoundsViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.requirement)
    }
}

/// Range checks over the numeric survey answers. Shared by JSON intake and
/// the direct risk assessment endpoint, which accepts pre-built answers.
pub fn validate_bounds(answers: &SurveyAnswers) -> Result<(), BoundsViolation> {
    if let Some(age) = answers.age {
        if !(1..=120).contains(&age) {
            return Err(BoundsViolation {
                field: "age",
                requirement: "must be between 1 and 120",
            });
        }
    }
    if let Some(sleep) = answers.sleep {
        if !(1..=24).contains(&sleep) {
            return Err(BoundsViolation {
                field: "sleep",
                requirement: "must be between 1 and 24 hours",
            });
        }
    }
    if let Some(weight) = answers.weight {
        if !(20.0..=500.0).contains(&weight) {
            return Err(BoundsViolation {
                field: "weight",
                requirement: "must be between 20 and 500 kilograms",
            });
        }
    }
    if let Some(height) = answers.height {
        if !(50.0..=300.0).contains(&height) {
            return Err(BoundsViolation {
                field: "height",
                requirement: "must be between 50 and 300 centimeters",
            });
        }
    }
    Ok(())
}

/// Parses a JSON capture. Syntax errors and schema violations both surface
/// as [`ParseError`]; a structurally sound capture that is too sparse to
/// score comes back with empty answers and zero confidence instead.
pub fn parse_json_input(input: &str) -> Result<ParsedAnswers, ParseError> {
    let answers: SurveyAnswers = serde_json::from_str(input).map_err(classify)?;
    validate_bounds(&answers).map_err(|_| ParseError::InvalidStructure)?;

    let report = survey_completeness(&answers);
    if !report.is_valid {
        return Ok(ParsedAnswers {
            answers: SurveyAnswers::default(),
            missing_fields: report.missing_fields,
            confidence: 0.0,
        });
    }

    let confidence = confidence_score(&answers, 1.0);
    Ok(ParsedAnswers {
        answers,
        missing_fields: report.missing_fields,
        confidence,
    })
}

fn classify(err: serde_json::Error) -> ParseError {
    match err.classify() {
        Category::Data => ParseError::InvalidStructure,
        _ => ParseError::Malformed(err.to_string()),
    }
}
