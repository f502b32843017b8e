use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use risk_profiler::assessment::{
    AssessmentService, DetailedRiskAssessment, DietInput, ImageSubmission, ParsedAnswers,
    RecommendationRequest, RiskAssessment, RiskAssessmentRequest, RiskLevel, RiskReport,
    ServiceConfig, TextAnalysis, TextAnalysisRequest,
};
use risk_profiler::error::AppError;
use risk_profiler::intake::InputFormat;
use risk_profiler::metrics::InMemoryMetrics;
use risk_profiler::ocr::MockOcrEngine;
use risk_profiler::recommend::RecommendationsWithSummary;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum CaptureFormat {
    Text,
    Json,
}

impl From<CaptureFormat> for InputFormat {
    fn from(format: CaptureFormat) -> Self {
        match format {
            CaptureFormat::Text => InputFormat::Text,
            CaptureFormat::Json => InputFormat::Json,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Path to a survey capture to assess.
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// How the capture is encoded.
    #[arg(long, value_enum, default_value_t = CaptureFormat::Text)]
    pub(crate) format: CaptureFormat,
    /// Also print the recommendation plan for the assessed profile.
    #[arg(long)]
    pub(crate) recommendations: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the scanned-form leg of the walkthrough.
    #[arg(long)]
    pub(crate) include_scan: bool,
    /// Skip the recommendation plan at the end of the walkthrough.
    #[arg(long)]
    pub(crate) skip_recommendations: bool,
}

const SAMPLE_SURVEY: &str = "\
Age: 52
Smoker: yes
Exercise: rarely
Diet: fair
Alcohol: socially
Sleep: 6 hours
Stress: high
Weight: 92 kg
Height: 178 cm
History of hypertension.
";

fn build_service() -> Arc<AssessmentService<MockOcrEngine, InMemoryMetrics>> {
    Arc::new(AssessmentService::new(
        Arc::new(MockOcrEngine::new()),
        Arc::new(InMemoryMetrics::new()),
        ServiceConfig::default(),
    ))
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        format,
        recommendations,
    } = args;

    let text = std::fs::read_to_string(&input)?;
    let service = build_service();

    let analysis = match service.analyze_text(TextAnalysisRequest {
        text,
        format: format.into(),
    }) {
        Ok(analysis) => analysis,
        Err(err) => {
            println!("Capture rejected: {}", err);
            return Ok(());
        }
    };

    let parsed = match analysis {
        TextAnalysis::Parsed(parsed) => parsed,
        TextAnalysis::Incomplete {
            reason,
            suggestions,
            data,
        } => {
            render_incomplete(&reason, &suggestions, &data);
            return Ok(());
        }
    };

    println!("Capture from {}", input.display());
    render_capture(&parsed);

    let report = match service.assess_risk(RiskAssessmentRequest {
        answers: parsed.answers,
        include_factors: true,
    }) {
        Ok(report) => report,
        Err(err) => {
            println!("Assessment unavailable: {}", err);
            return Ok(());
        }
    };

    match report {
        RiskReport::Detailed(detailed) => {
            render_detailed(&detailed);
            if recommendations {
                render_plan_for(&service, basic_view(&detailed));
            }
        }
        RiskReport::Basic(assessment) => {
            render_banding(assessment.risk_level, assessment.score, assessment.confidence);
            if recommendations {
                render_plan_for(&service, assessment);
            }
        }
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        include_scan,
        skip_recommendations,
    } = args;

    let service = build_service();

    println!("Health risk profiler demo");
    println!("\nText capture");
    println!("{}", SAMPLE_SURVEY.trim_end());

    let analysis = match service.analyze_text(TextAnalysisRequest {
        text: SAMPLE_SURVEY.to_string(),
        format: InputFormat::Text,
    }) {
        Ok(analysis) => analysis,
        Err(err) => {
            println!("Capture rejected: {}", err);
            return Ok(());
        }
    };

    let parsed = match analysis {
        TextAnalysis::Parsed(parsed) => parsed,
        TextAnalysis::Incomplete {
            reason,
            suggestions,
            data,
        } => {
            render_incomplete(&reason, &suggestions, &data);
            return Ok(());
        }
    };

    println!("\nExtracted answers");
    render_capture(&parsed);

    if include_scan {
        println!("\nScanned form");
        let submission = ImageSubmission {
            image_data: "aGVhbHRoIHN1cnZleSBzY2FuIGJ5dGVz".repeat(4),
            filename: "intake-form.png".to_string(),
            mime_type: "image/png".to_string(),
        };
        match service.analyze_image(submission).await {
            Ok(analysis) => {
                println!(
                    "- Scan accepted after {} attempt(s) at {:.0}% confidence",
                    analysis.ocr_result.attempts,
                    analysis.ocr_result.confidence * 100.0
                );
                render_capture(&analysis.parsed_data);
            }
            Err(err) => println!("- Scan rejected: {}", err),
        }
    }

    let report = match service.assess_risk(RiskAssessmentRequest {
        answers: parsed.answers,
        include_factors: true,
    }) {
        Ok(report) => report,
        Err(err) => {
            println!("Assessment unavailable: {}", err);
            return Ok(());
        }
    };

    let RiskReport::Detailed(detailed) = report else {
        println!("Assessment unavailable: breakdown missing");
        return Ok(());
    };
    render_detailed(&detailed);

    if !skip_recommendations {
        render_plan_for(&service, basic_view(&detailed));
    }

    Ok(())
}

fn basic_view(report: &DetailedRiskAssessment) -> RiskAssessment {
    RiskAssessment {
        risk_level: report.risk_level,
        score: report.score,
        rationale: report.rationale.clone(),
        confidence: report.confidence,
        contributing_factors: report.contributing_factors.clone(),
    }
}

fn render_plan_for(
    service: &AssessmentService<MockOcrEngine, InMemoryMetrics>,
    assessment: RiskAssessment,
) {
    let plan = match service.recommend(RecommendationRequest {
        risk_assessment: assessment,
        user_preferences: None,
    }) {
        Ok(plan) => plan,
        Err(err) => {
            println!("Recommendations unavailable: {}", err);
            return;
        }
    };
    render_plan(&plan);
}

fn render_incomplete(reason: &str, suggestions: &[String], data: &ParsedAnswers) {
    println!("Profile incomplete: {}", reason);
    if !data.missing_fields.is_empty() {
        println!("Missing fields: {}", data.missing_fields.join(", "));
    }
    if !suggestions.is_empty() {
        println!("Suggestions:");
        for suggestion in suggestions {
            println!("- {}", suggestion);
        }
    }
}

fn render_capture(parsed: &ParsedAnswers) {
    println!("- Extraction confidence: {:.2}", parsed.confidence);
    if !parsed.missing_fields.is_empty() {
        println!("- Unanswered: {}", parsed.missing_fields.join(", "));
    }

    let answers = &parsed.answers;
    if let Some(age) = answers.age {
        println!("  - Age: {}", age);
    }
    if let Some(smoker) = answers.smoker {
        println!("  - Smoker: {}", if smoker { "yes" } else { "no" });
    }
    if let Some(exercise) = answers.exercise {
        println!("  - Exercise: {:?}", exercise);
    }
    match &answers.diet {
        Some(DietInput::Rated(quality)) => println!("  - Diet: {:?}", quality),
        Some(DietInput::Description(text)) => println!("  - Diet: {}", text),
        None => {}
    }
    if let Some(alcohol) = answers.alcohol {
        println!("  - Alcohol: {:?}", alcohol);
    }
    if let Some(sleep) = answers.sleep {
        println!("  - Sleep: {} hours", sleep);
    }
    if let Some(stress) = answers.stress {
        println!("  - Stress: {:?}", stress);
    }
    if let Some(weight) = answers.weight {
        println!("  - Weight: {} kg", weight);
    }
    if let Some(height) = answers.height {
        println!("  - Height: {} cm", height);
    }
    if let Some(history) = &answers.medical_history {
        println!("  - Medical history: {}", history.join(", "));
    }
}

fn render_banding(risk_level: RiskLevel, score: u32, confidence: f64) {
    println!(
        "Risk level: {} (score {}/100, confidence {:.2})",
        risk_level.label(),
        score,
        confidence
    );
    let guidance = risk_level.guidance();
    println!("- {}", guidance.summary);
    println!("- {}", guidance.recommendation);
}

fn render_detailed(report: &DetailedRiskAssessment) {
    println!("\nRisk assessment");
    render_banding(report.risk_level, report.score, report.confidence);

    println!("Contributing factors:");
    for factor in &report.contributing_factors {
        println!(
            "- {} ({} {}): +{} | {}",
            factor.name,
            factor.severity.label(),
            factor.category.label(),
            factor.points,
            factor.description
        );
    }

    let breakdown = &report.risk_breakdown;
    println!(
        "Category scores: lifestyle {} | medical {} | demographic {}",
        breakdown.lifestyle_score, breakdown.medical_score, breakdown.demographic_score
    );

    let interactions = &report.factor_interactions;
    if interactions.interactions.is_empty() {
        println!("Factor interactions: none detected");
    } else {
        println!(
            "Factor interactions (+{} compound risk):",
            interactions.compound_risk
        );
        for interaction in &interactions.interactions {
            println!("- {}", interaction);
        }
        for recommendation in &interactions.recommendations {
            println!("  -> {}", recommendation);
        }
    }

    println!(
        "Improvement potential: {}% of the current score is addressable",
        report.improvement_potential
    );
}

fn render_plan(plan: &RecommendationsWithSummary) {
    println!("\nRecommendation plan");
    println!(
        "- {} high priority item(s) | focus areas: {}",
        plan.summary.high_priority_count,
        plan.summary
            .primary_focus_areas
            .iter()
            .map(|area| area.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("- Timeline: {}", plan.summary.estimated_timeline);

    for rec in &plan.recommendations {
        println!(
            "- [{}] {} ({}, {})",
            rec.priority.label(),
            rec.title,
            rec.category.label(),
            rec.timeline
        );
        if let Some(first) = rec.action_items.first() {
            println!("    First step: {}", first);
        }
    }

    println!("{}", plan.disclaimer);
}
