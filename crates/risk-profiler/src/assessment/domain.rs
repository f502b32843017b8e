use serde::{Deserialize, Serialize};

/// Partially answered lifestyle survey. Every field is optional because
/// captures arrive incomplete by nature, whether typed, scanned, or posted
/// as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurveyAnswers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<AlcoholUse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<StressLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<CholesterolLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diabetes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_history: Option<Vec<String>>,
}

/// Diet arrives either as one of the rated buckets or as free text
/// ("lots of vegetables and fruits") that scoring classifies by keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DietInput {
    Rated(DietQuality),
    Description(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseLevel {
    Never,
    Rarely,
    Sometimes,
    Regularly,
    Daily,
}

impl ExerciseLevel {
    pub const fn points(self) -> u32 {
        match self {
            Self::Never => 15,
            Self::Rarely => 12,
            Self::Sometimes => 8,
            Self::Regularly => 4,
            Self::Daily => 0,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Never => "No regular physical activity",
            Self::Rarely => "Light activity less than once per week",
            Self::Sometimes => "Moderate activity 1-2 times per week",
            Self::Regularly => "Regular activity 3-4 times per week",
            Self::Daily => "Daily physical activity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl DietQuality {
    pub const fn points(self) -> u32 {
        match self {
            Self::Poor => 20,
            Self::Fair => 15,
            Self::Good => 8,
            Self::Excellent => 0,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Poor => "High processed foods, low fruits/vegetables",
            Self::Fair => "Some processed foods, moderate nutrition",
            Self::Good => "Balanced diet with regular fruits/vegetables",
            Self::Excellent => "Optimal nutrition with minimal processed foods",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholUse {
    Never,
    Rarely,
    Socially,
    Regularly,
    Daily,
}

impl AlcoholUse {
    pub const fn points(self) -> u32 {
        match self {
            Self::Never => 0,
            Self::Rarely => 2,
            Self::Socially => 5,
            Self::Regularly => 8,
            Self::Daily => 12,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Never => "No alcohol consumption",
            Self::Rarely => "Occasional social drinking",
            Self::Socially => "Regular social drinking",
            Self::Regularly => "Regular weekly consumption",
            Self::Daily => "Daily alcohol consumption",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl StressLevel {
    pub const fn points(self) -> u32 {
        match self {
            Self::Low => 0,
            Self::Moderate => 5,
            Self::High => 10,
            Self::VeryHigh => 15,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Well-managed stress levels",
            Self::Moderate => "Manageable stress with occasional peaks",
            Self::High => "Frequently high stress levels",
            Self::VeryHigh => "Chronic high stress affecting daily life",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CholesterolLevel {
    Normal,
    Borderline,
    High,
}

/// One scored contributor to the overall risk picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthFactor {
    pub name: String,
    pub category: FactorCategory,
    pub severity: Severity,
    pub points: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorCategory {
    Lifestyle,
    Medical,
    Demographic,
}

impl FactorCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Lifestyle => "lifestyle",
            Self::Medical => "medical",
            Self::Demographic => "demographic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Plain-language framing for a banded score, used by the CLI renderers.
    pub const fn guidance(self) -> LevelGuidance {
        match self {
            Self::Low => LevelGuidance {
                summary: "Your current lifestyle choices support good health outcomes",
                recommendation: "Maintain current healthy habits with minor optimizations",
            },
            Self::Moderate => LevelGuidance {
                summary: "Some lifestyle factors may increase your health risks over time",
                recommendation: "Consider making gradual improvements to reduce risk factors",
            },
            Self::High => LevelGuidance {
                summary: "Multiple factors significantly increase your risk of health complications",
                recommendation: "Prioritize immediate lifestyle changes and consult healthcare professionals",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelGuidance {
    pub summary: &'static str,
    pub recommendation: &'static str,
}

/// Banded risk assessment produced by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub score: u32,
    pub rationale: Vec<String>,
    pub confidence: f64,
    pub contributing_factors: Vec<HealthFactor>,
}

/// Assessment extended with the category breakdown and compounding analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedRiskAssessment {
    pub risk_level: RiskLevel,
    pub score: u32,
    pub rationale: Vec<String>,
    pub confidence: f64,
    pub contributing_factors: Vec<HealthFactor>,
    pub risk_breakdown: RiskBreakdown,
    pub factor_interactions: crate::scoring::FactorInteractions,
    pub improvement_potential: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskBreakdown {
    pub lifestyle_score: u32,
    pub medical_score: u32,
    pub demographic_score: u32,
}

/// Result of running a capture through intake: the answers that could be
/// recovered, which core fields are still missing, and how much the
/// extraction should be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAnswers {
    pub answers: SurveyAnswers,
    pub missing_fields: Vec<String>,
    pub confidence: f64,
}
