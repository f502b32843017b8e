//! Preference-driven adjustment of catalog templates.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::assessment::domain::{HealthFactor, Severity};

use super::{Priority, Recommendation};

/// Optional knobs a client may send alongside an assessment.
///
/// `focus_areas` is accepted for forward compatibility but does not yet
/// influence selection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub focus_areas: Option<Vec<String>>,
    #[serde(default)]
    pub difficulty_level: Option<DifficultyLevel>,
    #[serde(default)]
    pub time_commitment: Option<TimeCommitment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeCommitment {
    Low,
    Medium,
    High,
}

static DURATION_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)-(\d+)\s*(minutes|hours)").expect("duration pattern compiles")
});

static GRADUALLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)gradually").expect("gradually pattern compiles"));

static TIMELINE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)-(\d+)\s*(weeks?|months?)").expect("timeline pattern compiles")
});

/// Clones a catalog template and tailors it to the factor group and the
/// caller's stated preferences.
pub(crate) fn customize(
    template: &Recommendation,
    group: &[&HealthFactor],
    preferences: Option<&UserPreferences>,
) -> Recommendation {
    let mut customized = template.clone();

    let has_high_severity = group
        .iter()
        .any(|factor| factor.severity == Severity::High);
    if has_high_severity && customized.priority != Priority::High {
        customized.priority = Priority::High;
    }

    match preferences.and_then(|prefs| prefs.difficulty_level) {
        Some(DifficultyLevel::Beginner) => {
            customized.action_items = customized
                .action_items
                .iter()
                .map(|item| simplify(item))
                .collect();
            customized.timeline = extend_timeline(&customized.timeline);
        }
        Some(DifficultyLevel::Advanced) => {
            customized.action_items.extend([
                "Track detailed metrics and progress indicators".to_string(),
                "Research latest evidence and best practices".to_string(),
                "Consider advanced techniques or interventions".to_string(),
            ]);
        }
        _ => {}
    }

    if preferences.and_then(|prefs| prefs.time_commitment) == Some(TimeCommitment::Low) {
        customized.action_items.truncate(3);
    }

    customized
}

/// Collapses duration ranges to their lower bound and softens pacing language.
fn simplify(item: &str) -> String {
    let shortened = DURATION_RANGE.replace_all(item, |caps: &Captures<'_>| {
        format!("{} {}", &caps[1], &caps[3])
    });
    GRADUALLY
        .replace_all(&shortened, "slowly over several weeks")
        .into_owned()
}

/// Stretches week/month ranges so beginners get more runway.
fn extend_timeline(timeline: &str) -> String {
    TIMELINE_RANGE
        .replace_all(timeline, |caps: &Captures<'_>| {
            let start: u32 = caps[1].parse().unwrap_or(0);
            let end: u32 = caps[2].parse().unwrap_or(0);
            format!("{}-{} {}", start + 1, end + 2, &caps[3])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::FactorCategory;
    use crate::recommend::RecommendationCategory;

    fn factor(severity: Severity) -> HealthFactor {
        HealthFactor {
            name: "Chronic Stress".to_string(),
            category: FactorCategory::Lifestyle,
            severity,
            points: 10,
            description: String::new(),
        }
    }

    fn stress_template() -> Recommendation {
        Recommendation {
            id: "stress-002".to_string(),
            category: RecommendationCategory::Lifestyle,
            priority: Priority::Medium,
            title: "Work-Life Balance Optimization".to_string(),
            description: String::new(),
            action_items: vec![
                "Practice daily mindfulness meditation (10-20 minutes)".to_string(),
                "Gradually reduce sugar in coffee/tea".to_string(),
                "Schedule regular breaks during work day".to_string(),
                "Develop hobbies and activities outside of work".to_string(),
            ],
            timeline: "2-4 weeks to implement changes".to_string(),
            evidence_level: String::new(),
        }
    }

    #[test]
    fn high_severity_factor_escalates_priority() {
        let severe = factor(Severity::High);
        let customized = customize(&stress_template(), &[&severe], None);
        assert_eq!(customized.priority, Priority::High);
    }

    #[test]
    fn moderate_factors_keep_template_priority() {
        let mild = factor(Severity::Moderate);
        let customized = customize(&stress_template(), &[&mild], None);
        assert_eq!(customized.priority, Priority::Medium);
    }

    #[test]
    fn beginner_preference_simplifies_items_and_extends_timeline() {
        let mild = factor(Severity::Low);
        let prefs = UserPreferences {
            difficulty_level: Some(DifficultyLevel::Beginner),
            ..UserPreferences::default()
        };

        let customized = customize(&stress_template(), &[&mild], Some(&prefs));

        assert_eq!(
            customized.action_items[0],
            "Practice daily mindfulness meditation (10 minutes)"
        );
        assert_eq!(
            customized.action_items[1],
            "slowly over several weeks reduce sugar in coffee/tea"
        );
        assert_eq!(customized.timeline, "3-6 weeks to implement changes");
    }

    #[test]
    fn advanced_preference_appends_deeper_steps() {
        let mild = factor(Severity::Low);
        let prefs = UserPreferences {
            difficulty_level: Some(DifficultyLevel::Advanced),
            ..UserPreferences::default()
        };

        let customized = customize(&stress_template(), &[&mild], Some(&prefs));

        assert_eq!(customized.action_items.len(), 7);
        assert_eq!(
            customized.action_items.last().map(String::as_str),
            Some("Consider advanced techniques or interventions")
        );
    }

    #[test]
    fn low_time_commitment_truncates_to_three_items() {
        let mild = factor(Severity::Low);
        let prefs = UserPreferences {
            time_commitment: Some(TimeCommitment::Low),
            ..UserPreferences::default()
        };

        let customized = customize(&stress_template(), &[&mild], Some(&prefs));
        assert_eq!(customized.action_items.len(), 3);
    }

    #[test]
    fn month_ranges_extend_like_week_ranges() {
        assert_eq!(
            extend_timeline("2-3 months for gradual transition"),
            "3-5 months for gradual transition"
        );
    }
}
