//! Turns a scored assessment into an actionable, prioritized plan.
//!
//! Recommendations come from a static catalog keyed by factor family, get
//! customized per user preferences, and are capped at eight entries so the
//! response stays digestible.

mod catalog;
mod customize;

pub use catalog::FactorType;
pub use customize::{DifficultyLevel, TimeCommitment, UserPreferences};

use serde::Serialize;

use crate::assessment::domain::{HealthFactor, RiskAssessment, RiskLevel};

/// Shown verbatim with every recommendation payload.
pub const MEDICAL_DISCLAIMER: &str = concat!(
    "\n",
    "This health risk assessment is for informational and wellness purposes only. \n",
    "It is not intended to be a substitute for professional medical advice, diagnosis, or treatment. \n",
    "Always seek the advice of your physician or other qualified health provider with any questions \n",
    "you may have regarding a medical condition. Never disregard professional medical advice or \n",
    "delay in seeking it because of something you have read in this assessment.\n",
);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    pub timeline: String,
    pub evidence_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Diet,
    Exercise,
    Lifestyle,
    Medical,
}

impl RecommendationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Exercise => "exercise",
            Self::Lifestyle => "lifestyle",
            Self::Medical => "medical",
        }
    }

    const fn weight(self) -> u8 {
        match self {
            Self::Medical => 4,
            Self::Lifestyle => 3,
            Self::Diet => 2,
            Self::Exercise => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Recommendation payload for an assessed profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    pub risk_level: RiskLevel,
    pub factors: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub status: &'static str,
    pub disclaimer: &'static str,
}

/// Digest of the plan, derived after prioritization.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSummary {
    pub high_priority_count: usize,
    pub primary_focus_areas: Vec<RecommendationCategory>,
    pub estimated_timeline: &'static str,
    pub key_actions: Vec<String>,
}

/// [`RecommendationSet`] plus its [`RecommendationSummary`], as served over
/// the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsWithSummary {
    pub risk_level: RiskLevel,
    pub factors: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub status: &'static str,
    pub disclaimer: &'static str,
    pub summary: RecommendationSummary,
}

impl RecommendationsWithSummary {
    pub fn from_set(set: RecommendationSet) -> Self {
        let summary = summarize(&set.recommendations);
        Self {
            risk_level: set.risk_level,
            factors: set.factors,
            recommendations: set.recommendations,
            status: set.status,
            disclaimer: set.disclaimer,
            summary,
        }
    }
}

/// Builds the prioritized plan for an assessment.
///
/// Factors are grouped by family in the order they were extracted; each
/// family contributes its catalog entries (or a generic fallback), high-band
/// assessments always gain a comprehensive-evaluation entry, and the final
/// list is sorted and capped at eight.
pub fn generate(
    assessment: &RiskAssessment,
    preferences: Option<&UserPreferences>,
) -> RecommendationSet {
    let mut recommendations = Vec::new();

    for (factor_type, group) in group_factors(&assessment.contributing_factors) {
        let templates = catalog::recommendations_for(factor_type);
        if templates.is_empty() {
            if let Some(first) = group.first() {
                recommendations.push(catalog::generic_recommendation(factor_type, first));
            }
        } else {
            for template in templates {
                recommendations.push(customize::customize(template, &group, preferences));
            }
        }
    }

    if assessment.risk_level == RiskLevel::High {
        recommendations.push(catalog::general_high_risk_recommendation());
    }

    prioritize(&mut recommendations);
    recommendations.truncate(8);

    RecommendationSet {
        risk_level: assessment.risk_level,
        factors: assessment.rationale.clone(),
        recommendations,
        status: "ok",
        disclaimer: MEDICAL_DISCLAIMER,
    }
}

/// Groups factors by family, preserving first-seen order so the catalog
/// contributes entries in the same order the factors were reported.
fn group_factors(factors: &[HealthFactor]) -> Vec<(FactorType, Vec<&HealthFactor>)> {
    let mut groups: Vec<(FactorType, Vec<&HealthFactor>)> = Vec::new();
    for factor in factors {
        let factor_type = catalog::identify_factor_type(factor);
        match groups.iter_mut().find(|(existing, _)| *existing == factor_type) {
            Some((_, members)) => members.push(factor),
            None => groups.push((factor_type, vec![factor])),
        }
    }
    groups
}

/// Stable sort: priority first, then clinical weight of the category, so
/// ties keep their grouping order.
fn prioritize(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.category.weight().cmp(&a.category.weight()))
    });
}

/// Derives the digest clients render above the full plan.
pub fn summarize(recommendations: &[Recommendation]) -> RecommendationSummary {
    let high_priority_count = recommendations
        .iter()
        .filter(|rec| rec.priority == Priority::High)
        .count();

    let mut primary_focus_areas = Vec::new();
    for rec in recommendations {
        if !primary_focus_areas.contains(&rec.category) {
            primary_focus_areas.push(rec.category);
        }
    }

    let key_actions = recommendations
        .iter()
        .filter(|rec| rec.priority == Priority::High)
        .take(3)
        .filter_map(|rec| rec.action_items.first().cloned())
        .collect();

    RecommendationSummary {
        high_priority_count,
        primary_focus_areas,
        estimated_timeline: "2-12 weeks for initial changes, 3-6 months for sustained improvement",
        key_actions,
    }
}
