//! Deterministic risk scoring.
//!
//! Factor extraction, the interaction bonus, banding, and the detailed
//! category breakdown. The same answers always produce the same assessment;
//! there is no sampling anywhere in this path.

mod config;
mod interactions;
mod rules;

pub use config::ScoringConfig;
pub use interactions::FactorInteractions;
pub use rules::ExtractedFactors;

use crate::assessment::domain::{
    DetailedRiskAssessment, FactorCategory, RiskAssessment, RiskBreakdown, Severity, SurveyAnswers,
};
use crate::validation::confidence_score;

/// Scoring engine configured with one [`ScoringConfig`].
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: ScoringConfig,
}

impl RiskEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one set of answers into a banded assessment. When two or more
    /// high-severity factors co-occur the base score is inflated by the
    /// interaction multiplier before rounding and the 100-point cap.
    pub fn score(&self, answers: &SurveyAnswers) -> RiskAssessment {
        let extracted = rules::extract_factors(answers, &self.config);
        let base_points = extracted.total_points();

        let high_count = extracted
            .factors
            .iter()
            .filter(|factor| factor.severity == Severity::High)
            .count();

        let mut score = base_points as f64;
        if high_count >= 2 {
            score += score * self.config.interaction_multiplier;
        }
        let final_score = (score.round() as u32).min(100);

        let rationale: Vec<String> = extracted
            .tags
            .iter()
            .take(3)
            .map(|tag| (*tag).to_string())
            .collect();

        RiskAssessment {
            risk_level: self.config.level_for(final_score),
            score: final_score,
            rationale,
            confidence: confidence_score(answers, 1.0),
            contributing_factors: extracted.factors,
        }
    }

    /// Extends [`RiskEngine::score`] with the per-category breakdown, the
    /// compounding analysis, and an estimate of how much of the score
    /// lifestyle changes could remove. Compound risk raises the reported
    /// score but the band is decided by the base score alone.
    pub fn detailed(&self, answers: &SurveyAnswers) -> DetailedRiskAssessment {
        let base = self.score(answers);
        let analysis = interactions::analyze_interactions(&base.contributing_factors);

        let category_sum = |category: FactorCategory| -> u32 {
            base.contributing_factors
                .iter()
                .filter(|factor| factor.category == category)
                .map(|factor| factor.points)
                .sum()
        };
        let breakdown = RiskBreakdown {
            lifestyle_score: category_sum(FactorCategory::Lifestyle),
            medical_score: category_sum(FactorCategory::Medical),
            demographic_score: category_sum(FactorCategory::Demographic),
        };

        let improvement_potential = if base.score == 0 {
            0
        } else {
            ((breakdown.lifestyle_score as f64 / base.score as f64) * 100.0).round() as u32
        };

        DetailedRiskAssessment {
            risk_level: base.risk_level,
            score: (base.score + analysis.compound_risk).min(100),
            rationale: base.rationale,
            confidence: base.confidence,
            contributing_factors: base.contributing_factors,
            risk_breakdown: breakdown,
            factor_interactions: analysis,
            improvement_potential,
        }
    }
}
