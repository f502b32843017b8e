//! Completeness and confidence checks for parsed survey captures.
//!
//! A capture is only worth scoring when at least half of the known survey
//! fields are present and none of the four core answers (age, smoking,
//! exercise, diet) is missing.

use crate::assessment::domain::{DietInput, ParsedAnswers, SurveyAnswers};

/// Fields a reliable assessment cannot do without, in reporting order.
pub const CORE_FIELDS: [&str; 4] = ["age", "smoker", "exercise", "diet"];

pub const INSUFFICIENT_DATA: &str =
    "Insufficient data provided. Please ensure at least 50% of core fields are completed.";

const LOW_QUALITY_REASON: &str = "Data quality is too low for reliable assessment";

#[derive(Debug, Clone, PartialEq)]
pub struct CompletenessReport {
    pub is_valid: bool,
    /// Fraction of the known survey fields that carry an answer.
    pub completeness: f64,
    /// Core fields with no usable answer, in reporting order.
    pub missing_fields: Vec<String>,
}

/// A capture that cannot be assessed yet, with guidance on how to fix it.
#[derive(Debug, Clone, PartialEq)]
pub struct IncompleteProfile {
    pub reason: String,
    pub suggestions: Vec<String>,
}

/// Field-by-field presence over the whole survey shape. A blank diet or
/// blood pressure string counts as missing; an empty history list does not,
/// because the respondent explicitly reported nothing.
fn field_presence(answers: &SurveyAnswers) -> [(&'static str, bool); 14] {
    [
        ("age", answers.age.is_some()),
        ("smoker", answers.smoker.is_some()),
        ("exercise", answers.exercise.is_some()),
        ("diet", diet_present(answers)),
        ("alcohol", answers.alcohol.is_some()),
        ("sleep", answers.sleep.is_some()),
        ("stress", answers.stress.is_some()),
        ("medicalHistory", answers.medical_history.is_some()),
        ("weight", answers.weight.is_some()),
        ("height", answers.height.is_some()),
        ("bloodPressure", blood_pressure_present(answers)),
        ("cholesterol", answers.cholesterol.is_some()),
        ("diabetes", answers.diabetes.is_some()),
        ("familyHistory", answers.family_history.is_some()),
    ]
}

fn diet_present(answers: &SurveyAnswers) -> bool {
    match &answers.diet {
        Some(DietInput::Rated(_)) => true,
        Some(DietInput::Description(text)) => !text.is_empty(),
        None => false,
    }
}

fn blood_pressure_present(answers: &SurveyAnswers) -> bool {
    answers
        .blood_pressure
        .as_deref()
        .is_some_and(|value| !value.is_empty())
}

/// Measures how complete a set of answers is and whether it clears the bar
/// for scoring.
pub fn survey_completeness(answers: &SurveyAnswers) -> CompletenessReport {
    let presence = field_presence(answers);
    let present = presence.iter().filter(|(_, found)| *found).count();
    let completeness = present as f64 / presence.len() as f64;

    let missing_fields: Vec<String> = presence
        .iter()
        .filter(|(name, found)| !found && CORE_FIELDS.contains(name))
        .map(|(name, _)| (*name).to_string())
        .collect();

    CompletenessReport {
        is_valid: completeness >= 0.5 && missing_fields.is_empty(),
        completeness,
        missing_fields,
    }
}

/// Blends completeness with the extraction quality of the capture channel.
/// Having all four core answers earns a small bonus; the result never
/// exceeds 1.0. Core presence here intentionally ignores blank strings so a
/// placeholder diet answer still counts toward the bonus.
pub fn confidence_score(answers: &SurveyAnswers, extraction_quality: f64) -> f64 {
    let report = survey_completeness(answers);
    let mut confidence = report.completeness * extraction_quality;

    let core_answered = answers.age.is_some()
        && answers.smoker.is_some()
        && answers.exercise.is_some()
        && answers.diet.is_some();
    if core_answered {
        confidence += 0.1;
    }

    confidence.min(1.0)
}

/// Decides whether a parsed capture is fit for assessment. Low-confidence
/// captures and captures missing more than two core fields are turned away
/// with concrete suggestions.
pub fn validate_parsed(parsed: &ParsedAnswers) -> Result<(), IncompleteProfile> {
    if parsed.confidence < 0.3 {
        return Err(IncompleteProfile {
            reason: LOW_QUALITY_REASON.to_string(),
            suggestions: vec![
                "Provide clearer information".to_string(),
                "Use structured format (JSON)".to_string(),
                "Upload a higher quality image if using OCR".to_string(),
            ],
        });
    }

    let core_missing: Vec<&str> = parsed
        .missing_fields
        .iter()
        .map(String::as_str)
        .filter(|field| CORE_FIELDS.contains(field))
        .collect();

    if core_missing.len() > 2 {
        return Err(IncompleteProfile {
            reason: INSUFFICIENT_DATA.to_string(),
            suggestions: vec![
                format!("Please provide information for: {}", core_missing.join(", ")),
                "At least 3 of the 4 core fields (age, smoking, exercise, diet) are required"
                    .to_string(),
            ],
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{DietQuality, ExerciseLevel};

    fn core_only() -> SurveyAnswers {
        SurveyAnswers {
            age: Some(35),
            smoker: Some(false),
            exercise: Some(ExerciseLevel::Regularly),
            diet: Some(DietInput::Rated(DietQuality::Good)),
            ..SurveyAnswers::default()
        }
    }

    #[test]
    fn empty_answers_are_invalid_with_all_core_missing() {
        let report = survey_completeness(&SurveyAnswers::default());

        assert!(!report.is_valid);
        assert_eq!(report.completeness, 0.0);
        assert_eq!(report.missing_fields, vec!["age", "smoker", "exercise", "diet"]);
    }

    #[test]
    fn core_fields_alone_do_not_reach_half_completeness() {
        let report = survey_completeness(&core_only());

        assert!(!report.is_valid);
        assert!((report.completeness - 4.0 / 14.0).abs() < 1e-9);
        assert!(report.missing_fields.is_empty());
    }

    #[test]
    fn seven_answers_with_core_clear_the_bar() {
        let answers = SurveyAnswers {
            alcohol: Some(crate::assessment::domain::AlcoholUse::Rarely),
            sleep: Some(7),
            stress: Some(crate::assessment::domain::StressLevel::Low),
            ..core_only()
        };

        let report = survey_completeness(&answers);
        assert!(report.is_valid);
        assert!((report.completeness - 7.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn blank_diet_description_counts_as_missing() {
        let answers = SurveyAnswers {
            diet: Some(DietInput::Description(String::new())),
            ..core_only()
        };

        let report = survey_completeness(&answers);
        assert_eq!(report.missing_fields, vec!["diet"]);
    }

    #[test]
    fn confidence_includes_core_bonus_and_caps_at_one() {
        let confidence = confidence_score(&core_only(), 1.0);
        let expected = 4.0 / 14.0 + 0.1;
        assert!((confidence - expected).abs() < 1e-9);

        let full = SurveyAnswers {
            alcohol: Some(crate::assessment::domain::AlcoholUse::Never),
            sleep: Some(8),
            stress: Some(crate::assessment::domain::StressLevel::Low),
            weight: Some(70.0),
            height: Some(175.0),
            blood_pressure: Some("120/80".to_string()),
            cholesterol: Some(crate::assessment::domain::CholesterolLevel::Normal),
            diabetes: Some(false),
            medical_history: Some(vec![]),
            family_history: Some(vec![]),
            ..core_only()
        };
        assert_eq!(confidence_score(&full, 1.0), 1.0);
    }

    #[test]
    fn blank_diet_still_earns_the_confidence_bonus() {
        let answers = SurveyAnswers {
            diet: Some(DietInput::Description(String::new())),
            ..core_only()
        };

        let expected = 3.0 / 14.0 + 0.1;
        assert!((confidence_score(&answers, 1.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn low_confidence_captures_are_turned_away() {
        let parsed = ParsedAnswers {
            answers: SurveyAnswers::default(),
            missing_fields: vec![],
            confidence: 0.2,
        };

        let err = validate_parsed(&parsed).expect_err("low confidence must be rejected");
        assert_eq!(err.reason, LOW_QUALITY_REASON);
        assert_eq!(err.suggestions.len(), 3);
    }

    #[test]
    fn three_missing_core_fields_are_rejected_with_field_list() {
        let parsed = ParsedAnswers {
            answers: SurveyAnswers::default(),
            missing_fields: vec![
                "age".to_string(),
                "smoker".to_string(),
                "exercise".to_string(),
            ],
            confidence: 0.6,
        };

        let err = validate_parsed(&parsed).expect_err("too much missing core data");
        assert_eq!(err.reason, INSUFFICIENT_DATA);
        assert!(err.suggestions[0].contains("age, smoker, exercise"));
    }

    #[test]
    fn two_missing_core_fields_pass_validation() {
        let parsed = ParsedAnswers {
            answers: core_only(),
            missing_fields: vec!["age".to_string(), "diet".to_string()],
            confidence: 0.6,
        };

        assert!(validate_parsed(&parsed).is_ok());
    }
}
