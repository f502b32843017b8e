//! Compounding between extracted factors.
//!
//! Certain pairs of factors are worse together than apart. Detection keys
//! off the factor names so the analysis works on any factor list, including
//! ones posted directly to the recommendations endpoint.

use serde::Serialize;

use crate::assessment::domain::{FactorCategory, HealthFactor};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorInteractions {
    pub interactions: Vec<String>,
    #[serde(rename = "compoundRisk")]
    pub compound_risk: u32,
    pub recommendations: Vec<String>,
}

pub(crate) fn analyze_interactions(factors: &[HealthFactor]) -> FactorInteractions {
    let mut interactions = Vec::new();
    let mut compound_risk = 0;
    let mut recommendations = Vec::new();

    let named = |needle: &str| {
        factors
            .iter()
            .any(|factor| factor.name.to_lowercase().contains(needle))
    };

    if named("smoking") && named("diet") {
        interactions.push(
            "Smoking combined with poor diet significantly increases cardiovascular risk"
                .to_string(),
        );
        compound_risk += 10;
        recommendations.push(
            "Priority: Address both smoking cessation and dietary improvements simultaneously"
                .to_string(),
        );
    }

    if named("inactivity") && named("weight") {
        interactions.push(
            "Physical inactivity and weight issues create a cycle that increases metabolic risk"
                .to_string(),
        );
        compound_risk += 8;
        recommendations
            .push("Start with low-impact exercise to break the inactivity-weight cycle".to_string());
    }

    if named("stress") && named("sleep") {
        interactions.push(
            "Chronic stress and poor sleep quality compound each other, affecting overall health"
                .to_string(),
        );
        compound_risk += 6;
        recommendations
            .push("Focus on stress management techniques that improve sleep quality".to_string());
    }

    let lifestyle_count = factors
        .iter()
        .filter(|factor| factor.category == FactorCategory::Lifestyle)
        .count();
    if lifestyle_count >= 3 {
        interactions.push(
            "Multiple lifestyle risk factors compound to significantly increase overall health risk"
                .to_string(),
        );
        compound_risk += lifestyle_count as u32 * 2;
        recommendations.push(
            "Consider a comprehensive lifestyle modification approach rather than isolated changes"
                .to_string(),
        );
    }

    FactorInteractions {
        interactions,
        compound_risk,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Severity;

    fn factor(name: &str, category: FactorCategory, points: u32) -> HealthFactor {
        HealthFactor {
            name: name.to_string(),
            category,
            severity: Severity::Moderate,
            points,
            description: String::new(),
        }
    }

    #[test]
    fn smoking_and_diet_compound() {
        let factors = vec![
            factor("Smoking", FactorCategory::Lifestyle, 25),
            factor("Poor Diet Quality", FactorCategory::Lifestyle, 20),
        ];
        let analysis = analyze_interactions(&factors);

        assert_eq!(analysis.compound_risk, 10);
        assert_eq!(analysis.interactions.len(), 1);
        assert!(analysis.interactions[0].contains("cardiovascular risk"));
    }

    #[test]
    fn inactivity_weight_and_stress_sleep_pairs_are_detected() {
        let factors = vec![
            factor("Physical Inactivity", FactorCategory::Lifestyle, 15),
            factor("Weight Risk Factor", FactorCategory::Medical, 15),
            factor("Chronic Stress", FactorCategory::Lifestyle, 10),
            factor("Sleep Disruption", FactorCategory::Lifestyle, 8),
        ];
        let analysis = analyze_interactions(&factors);

        // Pairs add 8 + 6; three lifestyle factors add 3 * 2.
        assert_eq!(analysis.compound_risk, 20);
        assert_eq!(analysis.interactions.len(), 3);
        assert_eq!(analysis.recommendations.len(), 3);
    }

    #[test]
    fn unrelated_factors_do_not_compound() {
        let factors = vec![
            factor("Age Risk Factor", FactorCategory::Demographic, 12),
            factor("Pre-existing Conditions", FactorCategory::Medical, 10),
        ];
        let analysis = analyze_interactions(&factors);

        assert_eq!(analysis.compound_risk, 0);
        assert!(analysis.interactions.is_empty());
        assert!(analysis.recommendations.is_empty());
    }
}
