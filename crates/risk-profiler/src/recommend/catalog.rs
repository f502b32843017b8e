//! Static recommendation catalog.
//!
//! Entries are keyed by factor type and cloned into each response before
//! customization, so the catalog itself is never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::assessment::domain::{HealthFactor, Severity};

use super::{Priority, Recommendation, RecommendationCategory};

/// Factor families the catalog knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorType {
    Smoking,
    PoorDiet,
    LowExercise,
    HighStress,
    PoorSleep,
    ExcessiveAlcohol,
    AbnormalWeight,
    AdvancedAge,
    MedicalHistory,
    General,
}

impl FactorType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smoking => "smoking",
            Self::PoorDiet => "poor diet",
            Self::LowExercise => "low exercise",
            Self::HighStress => "high stress",
            Self::PoorSleep => "poor sleep",
            Self::ExcessiveAlcohol => "excessive alcohol",
            Self::AbnormalWeight => "abnormal weight",
            Self::AdvancedAge => "advanced age",
            Self::MedicalHistory => "medical history",
            Self::General => "general",
        }
    }
}

/// Classifies a factor by its display name, so factors posted by clients
/// match the catalog the same way internally extracted ones do.
pub(crate) fn identify_factor_type(factor: &HealthFactor) -> FactorType {
    let name = factor.name.to_lowercase();

    if name.contains("smoking") {
        FactorType::Smoking
    } else if name.contains("diet") || name.contains("nutrition") {
        FactorType::PoorDiet
    } else if name.contains("exercise") || name.contains("physical") || name.contains("inactivity")
    {
        FactorType::LowExercise
    } else if name.contains("stress") || name.contains("anxiety") {
        FactorType::HighStress
    } else if name.contains("sleep") {
        FactorType::PoorSleep
    } else if name.contains("alcohol") {
        FactorType::ExcessiveAlcohol
    } else if name.contains("weight") || name.contains("bmi") || name.contains("obesity") {
        FactorType::AbnormalWeight
    } else if name.contains("age") {
        FactorType::AdvancedAge
    } else if name.contains("medical") || name.contains("condition") {
        FactorType::MedicalHistory
    } else {
        FactorType::General
    }
}

pub(crate) fn recommendations_for(factor_type: FactorType) -> &'static [Recommendation] {
    catalog()
        .get(&factor_type)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Fallback for factor families without catalog entries.
pub(crate) fn generic_recommendation(factor_type: FactorType, factor: &HealthFactor) -> Recommendation {
    Recommendation {
        id: format!("generic-{}", factor_type.label()),
        category: RecommendationCategory::Lifestyle,
        priority: if factor.severity == Severity::High {
            Priority::High
        } else {
            Priority::Medium
        },
        title: format!("Address {}", factor.name),
        description: format!(
            "Take steps to improve {} to reduce health risk",
            factor.name.to_lowercase()
        ),
        action_items: vec![
            "Consult with healthcare provider about this risk factor".to_string(),
            "Research evidence-based approaches for improvement".to_string(),
            "Set specific, measurable goals for improvement".to_string(),
            "Track progress regularly".to_string(),
        ],
        timeline: "2-4 weeks to develop action plan".to_string(),
        evidence_level: "General health promotion guidelines".to_string(),
    }
}

/// Appended for every high-band assessment regardless of factor mix.
pub(crate) fn general_high_risk_recommendation() -> Recommendation {
    template(
        "general-high-risk",
        RecommendationCategory::Medical,
        Priority::High,
        "Comprehensive Health Assessment",
        "Schedule a comprehensive health evaluation to address multiple risk factors",
        &[
            "Schedule appointment with primary care physician within 2 weeks",
            "Prepare list of all current medications and supplements",
            "Bring complete family health history",
            "Discuss creating a personalized risk reduction plan",
            "Consider referral to specialists if needed",
        ],
        "Within 2-4 weeks",
        "Clinical practice guidelines for high-risk patients",
    )
}

fn catalog() -> &'static HashMap<FactorType, Vec<Recommendation>> {
    static CATALOG: OnceLock<HashMap<FactorType, Vec<Recommendation>>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    category: RecommendationCategory,
    priority: Priority,
    title: &str,
    description: &str,
    action_items: &[&str],
    timeline: &str,
    evidence_level: &str,
) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        category,
        priority,
        title: title.to_string(),
        description: description.to_string(),
        action_items: action_items.iter().map(|item| (*item).to_string()).collect(),
        timeline: timeline.to_string(),
        evidence_level: evidence_level.to_string(),
    }
}

fn build_catalog() -> HashMap<FactorType, Vec<Recommendation>> {
    let mut catalog = HashMap::new();

    catalog.insert(
        FactorType::Smoking,
        vec![
            template(
                "smoking-001",
                RecommendationCategory::Lifestyle,
                Priority::High,
                "Quit Smoking Program",
                "Enroll in a comprehensive smoking cessation program with professional support",
                &[
                    "Set a quit date within the next 2 weeks",
                    "Consult your doctor about nicotine replacement therapy",
                    "Join a smoking cessation support group",
                    "Download a quit-smoking app for daily motivation",
                    "Remove all smoking triggers from your environment",
                ],
                "0-3 months for initial cessation, ongoing support",
                "Strong evidence from multiple randomized controlled trials",
            ),
            template(
                "smoking-002",
                RecommendationCategory::Medical,
                Priority::High,
                "Medical Consultation for Smoking Cessation",
                "Seek professional medical guidance for personalized quit-smoking strategies",
                &[
                    "Schedule appointment with primary care physician",
                    "Discuss prescription cessation aids (varenicline, bupropion)",
                    "Get lung function assessment",
                    "Create personalized quit plan with healthcare provider",
                ],
                "Within 1-2 weeks",
                "Clinical practice guidelines recommendation",
            ),
        ],
    );

    catalog.insert(
        FactorType::PoorDiet,
        vec![
            template(
                "diet-001",
                RecommendationCategory::Diet,
                Priority::High,
                "Mediterranean Diet Adoption",
                "Transition to a Mediterranean-style eating pattern proven to reduce cardiovascular risk",
                &[
                    "Increase daily vegetable servings to 5-7 portions",
                    "Replace refined grains with whole grains",
                    "Include fish 2-3 times per week",
                    "Use olive oil as primary cooking fat",
                    "Limit processed foods and added sugars to <10% of calories",
                ],
                "2-3 months for gradual transition",
                "Strong evidence from Mediterranean diet studies",
            ),
            template(
                "diet-002",
                RecommendationCategory::Diet,
                Priority::Medium,
                "Sugar Reduction Strategy",
                "Systematically reduce added sugar intake to improve metabolic health",
                &[
                    "Eliminate sugar-sweetened beverages",
                    "Read nutrition labels to identify hidden sugars",
                    "Replace sugary snacks with fruits and nuts",
                    "Gradually reduce sugar in coffee/tea",
                    "Choose unsweetened alternatives when available",
                ],
                "4-6 weeks for taste adaptation",
                "WHO and dietary guidelines consensus",
            ),
        ],
    );

    catalog.insert(
        FactorType::LowExercise,
        vec![
            template(
                "exercise-001",
                RecommendationCategory::Exercise,
                Priority::High,
                "Progressive Exercise Program",
                "Build up to recommended 150 minutes of moderate activity per week",
                &[
                    "Start with 10-minute daily walks",
                    "Increase walking duration by 5 minutes weekly",
                    "Add 2 days of strength training per week",
                    "Include flexibility exercises 3 times per week",
                    "Track progress with activity monitor or app",
                ],
                "8-12 weeks to reach target activity level",
                "Physical Activity Guidelines for Americans",
            ),
            template(
                "exercise-002",
                RecommendationCategory::Exercise,
                Priority::Medium,
                "Sedentary Behavior Reduction",
                "Break up prolonged sitting with regular movement throughout the day",
                &[
                    "Set hourly reminders to stand and move for 2-3 minutes",
                    "Use standing desk for part of workday if possible",
                    "Take stairs instead of elevators when available",
                    "Park farther away or get off transit one stop early",
                    "Do bodyweight exercises during TV commercial breaks",
                ],
                "Immediate implementation, habit formation in 3-4 weeks",
                "Emerging evidence on sedentary behavior risks",
            ),
        ],
    );

    catalog.insert(
        FactorType::HighStress,
        vec![
            template(
                "stress-001",
                RecommendationCategory::Lifestyle,
                Priority::High,
                "Stress Management Techniques",
                "Learn and practice evidence-based stress reduction methods",
                &[
                    "Practice daily mindfulness meditation (10-20 minutes)",
                    "Learn deep breathing exercises for acute stress",
                    "Establish regular sleep schedule",
                    "Identify and modify stress triggers where possible",
                    "Consider cognitive behavioral therapy if stress is severe",
                ],
                "4-8 weeks to develop consistent practice",
                "Strong evidence for mindfulness-based interventions",
            ),
            template(
                "stress-002",
                RecommendationCategory::Lifestyle,
                Priority::Medium,
                "Work-Life Balance Optimization",
                "Create boundaries and strategies to manage work-related stress",
                &[
                    "Set clear work hours and stick to them",
                    "Practice saying no to non-essential commitments",
                    "Schedule regular breaks during work day",
                    "Develop hobbies and activities outside of work",
                    "Consider discussing workload with supervisor if needed",
                ],
                "2-4 weeks to implement changes",
                "Occupational health research findings",
            ),
        ],
    );

    catalog.insert(
        FactorType::PoorSleep,
        vec![template(
            "sleep-001",
            RecommendationCategory::Lifestyle,
            Priority::High,
            "Sleep Hygiene Improvement",
            "Establish healthy sleep habits to improve sleep quality and duration",
            &[
                "Maintain consistent bedtime and wake time",
                "Create dark, cool, quiet sleep environment",
                "Avoid screens 1 hour before bedtime",
                "Limit caffeine after 2 PM",
                "Establish relaxing bedtime routine",
            ],
            "2-4 weeks for sleep pattern adjustment",
            "Sleep medicine clinical practice guidelines",
        )],
    );

    catalog.insert(
        FactorType::ExcessiveAlcohol,
        vec![template(
            "alcohol-001",
            RecommendationCategory::Lifestyle,
            Priority::High,
            "Alcohol Reduction Plan",
            "Reduce alcohol consumption to recommended guidelines",
            &[
                "Track current alcohol intake for one week",
                "Set specific reduction goals (e.g., alcohol-free days)",
                "Replace alcoholic drinks with non-alcoholic alternatives",
                "Avoid high-risk situations and triggers",
                "Seek support from friends, family, or support groups",
            ],
            "4-8 weeks for gradual reduction",
            "Public health guidelines and clinical evidence",
        )],
    );

    catalog.insert(
        FactorType::AbnormalWeight,
        vec![template(
            "weight-001",
            RecommendationCategory::Lifestyle,
            Priority::High,
            "Sustainable Weight Management",
            "Achieve and maintain healthy weight through lifestyle changes",
            &[
                "Create modest caloric deficit of 300-500 calories per day",
                "Focus on whole foods and portion control",
                "Combine dietary changes with increased physical activity",
                "Track weight weekly, not daily",
                "Consider working with registered dietitian",
            ],
            "3-6 months for initial weight loss, ongoing maintenance",
            "Evidence-based weight management guidelines",
        )],
    );

    catalog.insert(
        FactorType::AdvancedAge,
        vec![template(
            "age-001",
            RecommendationCategory::Medical,
            Priority::Medium,
            "Age-Appropriate Health Screening",
            "Stay current with recommended health screenings for your age group",
            &[
                "Schedule annual physical examination",
                "Get age-appropriate cancer screenings",
                "Monitor blood pressure, cholesterol, and blood sugar",
                "Discuss bone density screening with healthcare provider",
                "Stay up to date with recommended vaccinations",
            ],
            "Ongoing, schedule annually",
            "Preventive care guidelines by age",
        )],
    );

    catalog.insert(
        FactorType::MedicalHistory,
        vec![template(
            "medical-001",
            RecommendationCategory::Medical,
            Priority::High,
            "Chronic Disease Management",
            "Optimize management of existing health conditions",
            &[
                "Maintain regular follow-up appointments",
                "Take medications as prescribed",
                "Monitor relevant health metrics at home",
                "Communicate changes in symptoms promptly",
                "Consider specialized care if needed",
            ],
            "Ongoing disease management",
            "Disease-specific clinical guidelines",
        )],
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::FactorCategory;

    fn named(name: &str) -> HealthFactor {
        HealthFactor {
            name: name.to_string(),
            category: FactorCategory::Lifestyle,
            severity: Severity::Moderate,
            points: 10,
            description: String::new(),
        }
    }

    #[test]
    fn factor_names_map_to_catalog_families() {
        assert_eq!(identify_factor_type(&named("Smoking")), FactorType::Smoking);
        assert_eq!(
            identify_factor_type(&named("Poor Diet Quality")),
            FactorType::PoorDiet
        );
        assert_eq!(
            identify_factor_type(&named("Physical Inactivity")),
            FactorType::LowExercise
        );
        assert_eq!(
            identify_factor_type(&named("Chronic Stress")),
            FactorType::HighStress
        );
        assert_eq!(
            identify_factor_type(&named("Sleep Disruption")),
            FactorType::PoorSleep
        );
        assert_eq!(
            identify_factor_type(&named("Alcohol Consumption")),
            FactorType::ExcessiveAlcohol
        );
        assert_eq!(
            identify_factor_type(&named("Weight Risk Factor")),
            FactorType::AbnormalWeight
        );
        assert_eq!(
            identify_factor_type(&named("Age Risk Factor")),
            FactorType::AdvancedAge
        );
        assert_eq!(
            identify_factor_type(&named("Pre-existing Conditions")),
            FactorType::MedicalHistory
        );
    }

    #[test]
    fn genetic_factors_fall_back_to_the_generic_family() {
        assert_eq!(
            identify_factor_type(&named("Genetic Risk Factors")),
            FactorType::General
        );
        assert!(recommendations_for(FactorType::General).is_empty());
    }

    #[test]
    fn every_known_family_has_catalog_entries() {
        for family in [
            FactorType::Smoking,
            FactorType::PoorDiet,
            FactorType::LowExercise,
            FactorType::HighStress,
            FactorType::PoorSleep,
            FactorType::ExcessiveAlcohol,
            FactorType::AbnormalWeight,
            FactorType::AdvancedAge,
            FactorType::MedicalHistory,
        ] {
            assert!(
                !recommendations_for(family).is_empty(),
                "missing entries for {family:?}"
            );
        }
    }

    #[test]
    fn smoking_entries_keep_their_catalog_identity() {
        let entries = recommendations_for(FactorType::Smoking);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "smoking-001");
        assert_eq!(entries[0].title, "Quit Smoking Program");
        assert_eq!(entries[0].action_items.len(), 5);
        assert_eq!(entries[1].id, "smoking-002");
        assert_eq!(entries[1].category, RecommendationCategory::Medical);
    }

    #[test]
    fn generic_recommendations_inherit_severity_as_priority() {
        let mut factor = named("Genetic Risk Factors");
        factor.severity = Severity::High;

        let rec = generic_recommendation(FactorType::General, &factor);
        assert_eq!(rec.id, "generic-general");
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.title, "Address Genetic Risk Factors");
        assert_eq!(
            rec.description,
            "Take steps to improve genetic risk factors to reduce health risk"
        );
    }
}
