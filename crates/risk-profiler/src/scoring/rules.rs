//! Factor extraction rules.
//!
//! Each rule inspects one answer, and contributes a scored [`HealthFactor`]
//! plus a short rationale tag when the answer carries risk. Rule order is
//! fixed so rationales and downstream grouping stay deterministic.

use crate::assessment::domain::{
    DietInput, FactorCategory, HealthFactor, Severity, SurveyAnswers,
};

use super::config::ScoringConfig;

/// Everything one pass over the answers produces: the detailed factors and
/// the rationale tags, in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFactors {
    pub factors: Vec<HealthFactor>,
    pub tags: Vec<&'static str>,
}

impl ExtractedFactors {
    pub fn total_points(&self) -> u32 {
        self.factors.iter().map(|factor| factor.points).sum()
    }
}

pub(crate) fn extract_factors(answers: &SurveyAnswers, config: &ScoringConfig) -> ExtractedFactors {
    let mut factors = Vec::new();
    let mut tags = Vec::new();

    if let Some(age) = answers.age {
        if age > config.age_factor_threshold {
            let points = (age - config.age_factor_threshold) * config.age_points_per_year;
            tags.push("advanced age");
            factors.push(HealthFactor {
                name: "Age Risk Factor".to_string(),
                category: FactorCategory::Demographic,
                severity: if points > 20 {
                    Severity::High
                } else if points > 10 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!("Age {age} increases cardiovascular and metabolic risk"),
            });
        }
    }

    if answers.smoker == Some(true) {
        tags.push("smoking");
        factors.push(HealthFactor {
            name: "Smoking".to_string(),
            category: FactorCategory::Lifestyle,
            severity: Severity::High,
            points: config.smoking_points,
            description: "Smoking significantly increases risk of cardiovascular disease, \
                          cancer, and respiratory issues"
                .to_string(),
        });
    }

    if let Some(level) = answers.exercise {
        let points = level.points();
        if points > 0 {
            tags.push("low exercise");
            factors.push(HealthFactor {
                name: "Physical Inactivity".to_string(),
                category: FactorCategory::Lifestyle,
                severity: if points >= 12 {
                    Severity::High
                } else if points >= 8 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "{} - increases risk of obesity, diabetes, and heart disease",
                    level.description()
                ),
            });
        }
    }

    if let Some(diet) = &answers.diet {
        let (points, description) = diet_rating(diet, config);
        if points > 0 {
            tags.push("poor diet");
            factors.push(HealthFactor {
                name: "Poor Diet Quality".to_string(),
                category: FactorCategory::Lifestyle,
                severity: if points >= 15 {
                    Severity::High
                } else if points >= 8 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "{description} - increases risk of obesity, diabetes, and cardiovascular disease"
                ),
            });
        }
    }

    if let Some(alcohol) = answers.alcohol {
        let points = alcohol.points();
        if points > 0 {
            tags.push("excessive alcohol");
            factors.push(HealthFactor {
                name: "Alcohol Consumption".to_string(),
                category: FactorCategory::Lifestyle,
                severity: if points >= 10 {
                    Severity::High
                } else if points >= 5 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "{} - increases risk of liver disease, cancer, and cardiovascular issues",
                    alcohol.description()
                ),
            });
        }
    }

    if let Some(stress) = answers.stress {
        let points = stress.points();
        if points > 0 {
            tags.push("high stress");
            factors.push(HealthFactor {
                name: "Chronic Stress".to_string(),
                category: FactorCategory::Lifestyle,
                severity: if points >= 12 {
                    Severity::High
                } else if points >= 8 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "{} - increases risk of cardiovascular disease and mental health issues",
                    stress.description()
                ),
            });
        }
    }

    if let Some(sleep) = answers.sleep {
        let (points, description) = if sleep < 6 {
            (
                config.poor_sleep_points,
                "Severely inadequate sleep (less than 6 hours)",
            )
        } else if sleep < 7 {
            (5, "Insufficient sleep (6-7 hours)")
        } else if sleep > 9 {
            (3, "Excessive sleep (more than 9 hours)")
        } else {
            (0, "")
        };

        if points > 0 {
            tags.push("poor sleep");
            factors.push(HealthFactor {
                name: "Sleep Disruption".to_string(),
                category: FactorCategory::Lifestyle,
                severity: if points >= 8 {
                    Severity::High
                } else if points >= 5 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "{description} - affects immune function, metabolism, and cardiovascular health"
                ),
            });
        }
    }

    if let (Some(weight), Some(height)) = (answers.weight, answers.height) {
        let height_in_meters = height / 100.0;
        let bmi = weight / (height_in_meters * height_in_meters);

        let (points, severity, description) = if bmi >= 30.0 {
            (15, Severity::High, format!("Obesity (BMI: {bmi:.1})"))
        } else if bmi >= 25.0 {
            (8, Severity::Moderate, format!("Overweight (BMI: {bmi:.1})"))
        } else if bmi < 18.5 {
            (5, Severity::Moderate, format!("Underweight (BMI: {bmi:.1})"))
        } else {
            (0, Severity::Low, String::new())
        };

        if points > 0 {
            tags.push("abnormal weight");
            factors.push(HealthFactor {
                name: "Weight Risk Factor".to_string(),
                category: FactorCategory::Medical,
                severity,
                points,
                description: format!(
                    "{description} - increases risk of diabetes, cardiovascular disease, and other health issues"
                ),
            });
        }
    }

    if let Some(history) = &answers.medical_history {
        if !history.is_empty() {
            let points = history.len() as u32 * 5;
            tags.push("medical history");
            factors.push(HealthFactor {
                name: "Pre-existing Conditions".to_string(),
                category: FactorCategory::Medical,
                severity: if points >= 15 {
                    Severity::High
                } else if points >= 10 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "{} - existing health conditions increase overall risk profile",
                    history.join(", ")
                ),
            });
        }
    }

    if let Some(family) = &answers.family_history {
        if !family.is_empty() {
            let points = family.len() as u32 * 3;
            tags.push("family history");
            factors.push(HealthFactor {
                name: "Genetic Risk Factors".to_string(),
                category: FactorCategory::Medical,
                severity: if points >= 9 {
                    Severity::High
                } else if points >= 6 {
                    Severity::Moderate
                } else {
                    Severity::Low
                },
                points,
                description: format!(
                    "Family history of {} - genetic predisposition increases risk",
                    family.join(", ")
                ),
            });
        }
    }

    ExtractedFactors { factors, tags }
}

fn diet_rating(diet: &DietInput, config: &ScoringConfig) -> (u32, String) {
    match diet {
        DietInput::Rated(quality) => (quality.points(), quality.description().to_string()),
        DietInput::Description(text) => {
            let lowered = text.to_lowercase();
            if lowered.contains("high sugar")
                || lowered.contains("processed")
                || lowered.contains("fast food")
            {
                (
                    config.poor_diet_points,
                    "High sugar and processed food consumption".to_string(),
                )
            } else if lowered.contains("vegetables")
                || lowered.contains("healthy")
                || lowered.contains("balanced")
            {
                (5, "Generally healthy but could be optimized".to_string())
            } else {
                (0, String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{AlcoholUse, DietQuality, ExerciseLevel, StressLevel};

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn empty_answers_extract_nothing() {
        let extracted = extract_factors(&SurveyAnswers::default(), &config());

        assert!(extracted.factors.is_empty());
        assert!(extracted.tags.is_empty());
        assert_eq!(extracted.total_points(), 0);
    }

    #[test]
    fn age_points_scale_past_the_threshold() {
        let answers = SurveyAnswers {
            age: Some(70),
            ..SurveyAnswers::default()
        };
        let extracted = extract_factors(&answers, &config());

        assert_eq!(extracted.tags, vec!["advanced age"]);
        let factor = &extracted.factors[0];
        assert_eq!(factor.name, "Age Risk Factor");
        assert_eq!(factor.points, 30);
        assert_eq!(factor.severity, Severity::High);
        assert_eq!(
            factor.description,
            "Age 70 increases cardiovascular and metabolic risk"
        );
    }

    #[test]
    fn age_at_the_threshold_contributes_nothing() {
        let answers = SurveyAnswers {
            age: Some(40),
            ..SurveyAnswers::default()
        };
        assert!(extract_factors(&answers, &config()).factors.is_empty());
    }

    #[test]
    fn smoking_is_always_a_high_severity_factor() {
        let answers = SurveyAnswers {
            smoker: Some(true),
            ..SurveyAnswers::default()
        };
        let extracted = extract_factors(&answers, &config());

        assert_eq!(extracted.factors.len(), 1);
        assert_eq!(extracted.factors[0].points, 25);
        assert_eq!(extracted.factors[0].severity, Severity::High);
        assert_eq!(extracted.factors[0].category, FactorCategory::Lifestyle);
    }

    #[test]
    fn declining_smoker_and_daily_exercise_extract_nothing() {
        let answers = SurveyAnswers {
            smoker: Some(false),
            exercise: Some(ExerciseLevel::Daily),
            ..SurveyAnswers::default()
        };
        assert!(extract_factors(&answers, &config()).factors.is_empty());
    }

    #[test]
    fn free_text_diets_are_classified_by_keyword() {
        let sugary = SurveyAnswers {
            diet: Some(DietInput::Description(
                "High sugar snacks and fast food most days".to_string(),
            )),
            ..SurveyAnswers::default()
        };
        let extracted = extract_factors(&sugary, &config());
        assert_eq!(extracted.factors[0].points, 20);
        assert_eq!(extracted.factors[0].severity, Severity::High);
        assert!(extracted.factors[0]
            .description
            .starts_with("High sugar and processed food consumption"));

        let leafy = SurveyAnswers {
            diet: Some(DietInput::Description(
                "balanced meals with vegetables".to_string(),
            )),
            ..SurveyAnswers::default()
        };
        let extracted = extract_factors(&leafy, &config());
        assert_eq!(extracted.factors[0].points, 5);
        assert_eq!(extracted.factors[0].severity, Severity::Low);

        let neutral = SurveyAnswers {
            diet: Some(DietInput::Description("three meals a day".to_string())),
            ..SurveyAnswers::default()
        };
        assert!(extract_factors(&neutral, &config()).factors.is_empty());
    }

    #[test]
    fn sleep_bands_score_short_and_long_sleepers() {
        let short = SurveyAnswers {
            sleep: Some(5),
            ..SurveyAnswers::default()
        };
        let factor = &extract_factors(&short, &config()).factors[0];
        assert_eq!(factor.points, 8);
        assert_eq!(factor.severity, Severity::High);

        let long = SurveyAnswers {
            sleep: Some(10),
            ..SurveyAnswers::default()
        };
        let factor = &extract_factors(&long, &config()).factors[0];
        assert_eq!(factor.points, 3);
        assert_eq!(factor.severity, Severity::Low);

        let healthy = SurveyAnswers {
            sleep: Some(8),
            ..SurveyAnswers::default()
        };
        assert!(extract_factors(&healthy, &config()).factors.is_empty());
    }

    #[test]
    fn bmi_is_computed_from_metric_weight_and_height() {
        let obese = SurveyAnswers {
            weight: Some(100.0),
            height: Some(170.0),
            ..SurveyAnswers::default()
        };
        let factor = &extract_factors(&obese, &config()).factors[0];
        assert_eq!(factor.name, "Weight Risk Factor");
        assert_eq!(factor.category, FactorCategory::Medical);
        assert_eq!(factor.points, 15);
        assert!(factor.description.starts_with("Obesity (BMI: 34.6)"));

        let underweight = SurveyAnswers {
            weight: Some(50.0),
            height: Some(175.0),
            ..SurveyAnswers::default()
        };
        let factor = &extract_factors(&underweight, &config()).factors[0];
        assert_eq!(factor.points, 5);
        assert_eq!(factor.severity, Severity::Moderate);
    }

    #[test]
    fn histories_score_per_reported_condition() {
        let answers = SurveyAnswers {
            medical_history: Some(vec![
                "diabetes".to_string(),
                "hypertension".to_string(),
                "asthma".to_string(),
            ]),
            family_history: Some(vec!["heart disease".to_string()]),
            ..SurveyAnswers::default()
        };
        let extracted = extract_factors(&answers, &config());

        assert_eq!(extracted.tags, vec!["medical history", "family history"]);
        assert_eq!(extracted.factors[0].points, 15);
        assert_eq!(extracted.factors[0].severity, Severity::High);
        assert!(extracted.factors[0].description.contains("diabetes, hypertension, asthma"));
        assert_eq!(extracted.factors[1].points, 3);
        assert_eq!(extracted.factors[1].severity, Severity::Low);
    }

    #[test]
    fn tags_follow_rule_declaration_order() {
        let answers = SurveyAnswers {
            age: Some(70),
            smoker: Some(true),
            exercise: Some(ExerciseLevel::Never),
            diet: Some(DietInput::Rated(DietQuality::Poor)),
            alcohol: Some(AlcoholUse::Daily),
            stress: Some(StressLevel::VeryHigh),
            sleep: Some(4),
            ..SurveyAnswers::default()
        };
        let extracted = extract_factors(&answers, &config());

        assert_eq!(
            extracted.tags,
            vec![
                "advanced age",
                "smoking",
                "low exercise",
                "poor diet",
                "excessive alcohol",
                "high stress",
                "poor sleep"
            ]
        );
    }
}
