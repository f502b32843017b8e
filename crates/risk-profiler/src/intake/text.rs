//! Pattern based extraction of survey answers from free text.
//!
//! Captures are lowercased and trimmed before matching. Level keywords are
//! tried in a fixed order and the first hit wins, mirroring how a human
//! reader would settle on the most explicit phrasing.

use std::sync::LazyLock;

use regex::Regex;

use crate::assessment::domain::{
    AlcoholUse, DietInput, DietQuality, ExerciseLevel, ParsedAnswers, StressLevel, SurveyAnswers,
};
use crate::validation::{confidence_score, survey_completeness};

/// Extraction quality attributed to free-text captures. Slightly below 1.0
/// because keyword matching misreads more often than structured input.
pub(crate) const TEXT_EXTRACTION_QUALITY: f64 = 0.8;

fn pattern(raw: &str) -> Regex {
    Regex::new(raw).expect("extraction pattern compiles")
}

static AGE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?:age[:\s]*|i am |aged? )\s*(\d{1,3})"));

static SMOKER_YES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"(?:smok|cigarette|tobacco)[a-z]*[:\s]*(?:yes|true|smoke|smoker)"),
        pattern(r"(?:i|do)\s+(?:am\s+a\s+)?smok"),
        pattern(r"(?:yes|true).*smok"),
    ]
});

static SMOKER_NO: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        pattern(r"(?:smok|cigarette|tobacco)[a-z]*[:\s]*(?:no|false|never|non)"),
        pattern(r"(?:don't|do not|never)\s+smok"),
        pattern(r"(?:no|false|never).*smok"),
        pattern(r"non[\s-]?smok"),
    ]
});

static EXERCISE: LazyLock<Vec<(ExerciseLevel, Regex)>> = LazyLock::new(|| {
    vec![
        (
            ExerciseLevel::Never,
            pattern(r"(?:exercise|physical activity|workout)[:\s]*(?:never|no|none)"),
        ),
        (
            ExerciseLevel::Rarely,
            pattern(r"(?:exercise|physical activity|workout)[:\s]*(?:rarely|seldom|hardly)"),
        ),
        (
            ExerciseLevel::Sometimes,
            pattern(r"(?:exercise|physical activity|workout)[:\s]*(?:sometimes|occasionally|2-3|two|three)"),
        ),
        (
            ExerciseLevel::Regularly,
            pattern(r"(?:exercise|physical activity|workout)[:\s]*(?:regularly|often|frequent|3-4|four|five)"),
        ),
        (
            ExerciseLevel::Daily,
            pattern(r"(?:exercise|physical activity|workout)[:\s]*(?:daily|every day|everyday|7)"),
        ),
    ]
});

// A filler "is" is tolerated between the subject and the rating so phrases
// like "diet is excellent" resolve.
static DIET: LazyLock<Vec<(DietQuality, Regex)>> = LazyLock::new(|| {
    vec![
        (
            DietQuality::Poor,
            pattern(r"(?:diet|eating|food)[:\s]*(?:is\s+)?(?:poor|bad|unhealthy|junk|fast food|processed)"),
        ),
        (
            DietQuality::Fair,
            pattern(r"(?:diet|eating|food)[:\s]*(?:is\s+)?(?:fair|okay|average|moderate)"),
        ),
        (
            DietQuality::Good,
            pattern(r"(?:diet|eating|food)[:\s]*(?:is\s+)?(?:good|healthy|balanced|nutritious)"),
        ),
        (
            DietQuality::Excellent,
            pattern(r"(?:diet|eating|food)[:\s]*(?:is\s+)?(?:excellent|great|very good|optimal|perfect)"),
        ),
    ]
});

static DIET_POOR_HINTS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"high sugar|sweet|candy|soda|processed food"));

static DIET_GOOD_HINTS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"vegetables|fruits|whole grain|lean protein"));

static ALCOHOL: LazyLock<Vec<(AlcoholUse, Regex)>> = LazyLock::new(|| {
    vec![
        (
            AlcoholUse::Never,
            pattern(r"(?:alcohol|drink|beer|wine)[:\s]*(?:never|no|none|don't)"),
        ),
        (
            AlcoholUse::Rarely,
            pattern(r"(?:alcohol|drink)[:\s]*(?:rarely|seldom|occasionally)"),
        ),
        (
            AlcoholUse::Socially,
            pattern(r"(?:alcohol|drink)[:\s]*(?:socially|social|parties|weekends)"),
        ),
        (
            AlcoholUse::Regularly,
            pattern(r"(?:alcohol|drink)[:\s]*(?:regularly|weekly|often)"),
        ),
        (
            AlcoholUse::Daily,
            pattern(r"(?:alcohol|drink)[:\s]*(?:daily|every day|everyday)"),
        ),
    ]
});

static SLEEP: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?:sleep[:\s]*|get\s+)\s*(\d{1,2})\s*(?:hours?|hrs?)"));

static STRESS: LazyLock<Vec<(StressLevel, Regex)>> = LazyLock::new(|| {
    vec![
        (
            StressLevel::Low,
            pattern(r"stress[:\s]*(?:low|minimal|little|no)"),
        ),
        (
            StressLevel::Moderate,
            pattern(r"stress[:\s]*(?:moderate|medium|some|manageable)"),
        ),
        (
            StressLevel::High,
            pattern(r"stress[:\s]*(?:high|significant|a lot)"),
        ),
        (
            StressLevel::VeryHigh,
            pattern(r"stress[:\s]*(?:very high|extreme|overwhelming|chronic)"),
        ),
    ]
});

static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?:weight[:\s]*|weigh\s+)\s*(\d{1,3})\s*(kg|kilograms?|lbs?|pounds?)?")
});

static HEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?:height[:\s]*|tall\s+)\s*(\d{1,3})\s*(cm|centimeters?|ft|feet|inches?|in)?")
});

const MEDICAL_KEYWORDS: [&str; 9] = [
    "diabetes",
    "hypertension",
    "heart disease",
    "high blood pressure",
    "high cholesterol",
    "obesity",
    "asthma",
    "depression",
    "anxiety",
];

/// Parses a free-text capture into answers plus a completeness verdict.
pub fn parse_text_input(text: &str) -> ParsedAnswers {
    let lowered = text.to_lowercase();
    let normalized = lowered.trim();

    let answers = extract_answers(normalized);
    let report = survey_completeness(&answers);
    let confidence = confidence_score(&answers, TEXT_EXTRACTION_QUALITY);

    ParsedAnswers {
        answers,
        missing_fields: report.missing_fields,
        confidence,
    }
}

fn extract_answers(text: &str) -> SurveyAnswers {
    SurveyAnswers {
        age: extract_age(text),
        smoker: extract_smoker(text),
        exercise: first_match(&EXERCISE, text),
        diet: extract_diet(text),
        alcohol: first_match(&ALCOHOL, text),
        sleep: extract_sleep(text),
        stress: first_match(&STRESS, text),
        weight: extract_weight(text),
        height: extract_height(text),
        medical_history: extract_medical_history(text),
        ..SurveyAnswers::default()
    }
}

fn first_match<T: Copy>(table: &[(T, Regex)], text: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(value, _)| *value)
}

fn extract_age(text: &str) -> Option<u32> {
    let caps = AGE.captures(text)?;
    let age: u32 = caps.get(1)?.as_str().parse().ok()?;
    (1..=120).contains(&age).then_some(age)
}

fn extract_smoker(text: &str) -> Option<bool> {
    if SMOKER_YES.iter().any(|re| re.is_match(text)) {
        Some(true)
    } else if SMOKER_NO.iter().any(|re| re.is_match(text)) {
        Some(false)
    } else {
        None
    }
}

fn extract_diet(text: &str) -> Option<DietInput> {
    if let Some(quality) = first_match(&DIET, text) {
        return Some(DietInput::Rated(quality));
    }
    // Free descriptions of eating habits still give a usable rating.
    if DIET_POOR_HINTS.is_match(text) {
        return Some(DietInput::Rated(DietQuality::Poor));
    }
    if DIET_GOOD_HINTS.is_match(text) {
        return Some(DietInput::Rated(DietQuality::Good));
    }
    None
}

fn extract_sleep(text: &str) -> Option<u32> {
    let caps = SLEEP.captures(text)?;
    let hours: u32 = caps.get(1)?.as_str().parse().ok()?;
    (1..=24).contains(&hours).then_some(hours)
}

fn extract_weight(text: &str) -> Option<f64> {
    let caps = WEIGHT.captures(text)?;
    let mut kilograms: f64 = caps.get(1)?.as_str().parse().ok()?;

    if let Some(unit) = caps.get(2) {
        let unit = unit.as_str();
        if unit.contains("lb") || unit.contains("pound") {
            kilograms = (kilograms * 0.453592).round();
        }
    }

    (20.0..=500.0).contains(&kilograms).then_some(kilograms)
}

fn extract_height(text: &str) -> Option<f64> {
    let caps = HEIGHT.captures(text)?;
    let mut centimeters: f64 = caps.get(1)?.as_str().parse().ok()?;

    if let Some(unit) = caps.get(2) {
        let unit = unit.as_str();
        // Small values with a feet unit are a height like "6 ft".
        if (unit.contains("ft") || unit.contains("feet")) && centimeters <= 8.0 {
            centimeters = (centimeters * 30.48).round();
        }
    }

    (50.0..=300.0).contains(&centimeters).then_some(centimeters)
}

fn extract_medical_history(text: &str) -> Option<Vec<String>> {
    let conditions: Vec<String> = MEDICAL_KEYWORDS
        .iter()
        .copied()
        .filter(|&keyword| text.contains(keyword))
        .map(str::to_string)
        .collect();
    (!conditions.is_empty()).then_some(conditions)
}
