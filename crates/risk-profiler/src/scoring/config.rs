use crate::assessment::domain::RiskLevel;

/// Tunable weights and bands for the risk engine. The defaults reproduce
/// the published scoring sheet; tests occasionally narrow them to force a
/// particular band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub smoking_points: u32,
    /// Points for a free-text diet that reads as high sugar or processed.
    pub poor_diet_points: u32,
    /// Points for severely short sleep (under six hours).
    pub poor_sleep_points: u32,
    /// Age at which each further year starts to add points.
    pub age_factor_threshold: u32,
    pub age_points_per_year: u32,
    /// Fractional bonus on the base score when two or more high-severity
    /// factors co-occur.
    pub interaction_multiplier: f64,
    pub low_risk_max: u32,
    pub moderate_risk_max: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            smoking_points: 25,
            poor_diet_points: 20,
            poor_sleep_points: 8,
            age_factor_threshold: 40,
            age_points_per_year: 1,
            interaction_multiplier: 0.1,
            low_risk_max: 30,
            moderate_risk_max: 60,
        }
    }
}

impl ScoringConfig {
    pub fn level_for(&self, score: u32) -> RiskLevel {
        if score <= self.low_risk_max {
            RiskLevel::Low
        } else if score <= self.moderate_risk_max {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}
