//! Development OCR engine that fabricates plausible survey scans.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::Rng;

use super::normalize::post_process_text;
use super::{OcrEngine, OcrError, OcrRequest, OcrResult};

const FORM_BALANCED: &str = concat!(
    "Age: 35\n",
    "Smoker: No\n",
    "Exercise: 3 times per week  \n",
    "Diet: Balanced, mostly home-cooked meals\n",
    "Weight: 75kg\n",
    "Height: 175cm\n",
    "Alcohol: Social drinking, 2-3 drinks per week\n",
    "Sleep: 7-8 hours per night\n",
    "Stress Level: Moderate work stress\n",
    "Medical History: None significant\n",
    "Family History: Father - heart disease at 65\n",
    "Blood Pressure: 120/80 (normal)\n",
    "Cholesterol: 210 mg/dL (slightly elevated)",
);

const FORM_ACTIVE: &str = concat!(
    "Age: 42\n",
    "Smoker: Former smoker (quit 2 years ago)\n",
    "Exercise: Running 4x per week, gym 2x per week\n",
    "Diet: Mediterranean diet with occasional treats\n",
    "Weight: 68kg\n",
    "Height: 165cm\n",
    "Alcohol: Wine with dinner, 4-5 glasses per week\n",
    "Sleep: 6-7 hours per night\n",
    "Stress Level: Low to moderate\n",
    "Medical History: Hypertension diagnosed last year\n",
    "Family History: Mother - diabetes, Father - stroke\n",
    "Blood Pressure: 135/85 (controlled with medication)\n",
    "Cholesterol: 190 mg/dL (normal)",
);

const FORM_LOW_RISK: &str = concat!(
    "Age: 28\n",
    "Smoker: Never\n",
    "Exercise: Yoga 3x per week, walking daily\n",
    "Diet: Vegetarian, high fiber\n",
    "Weight: 60kg\n",
    "Height: 160cm\n",
    "Alcohol: Rarely, special occasions only\n",
    "Sleep: 8-9 hours per night\n",
    "Stress Level: Low\n",
    "Medical History: None\n",
    "Family History: Grandmother - breast cancer\n",
    "Blood Pressure: 110/70 (normal)\n",
    "Cholesterol: 170 mg/dL (optimal)",
);

/// Scanned-form texts the mock rotates through.
const SAMPLE_FORMS: [&str; 3] = [FORM_BALANCED, FORM_ACTIVE, FORM_LOW_RISK];

/// Stand-in engine for development and demos.
///
/// Returns one of a few realistic survey forms with a simulated scan delay
/// and a confidence drawn from 0.75..0.95.
#[derive(Debug, Clone)]
pub struct MockOcrEngine {
    latency_min_ms: u64,
    latency_max_ms: u64,
}

impl MockOcrEngine {
    pub fn new() -> Self {
        Self::with_latency(1500, 3500)
    }

    /// Tests and demos shrink the simulated scan delay to keep runs fast.
    pub fn with_latency(min_ms: u64, max_ms: u64) -> Self {
        Self {
            latency_min_ms: min_ms,
            latency_max_ms: max_ms.max(min_ms),
        }
    }
}

impl Default for MockOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for MockOcrEngine {
    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResult, OcrError> {
        let started = Instant::now();

        // thread_rng is not Send, so finish every draw before the await.
        let (latency_ms, form_index, confidence) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(self.latency_min_ms..=self.latency_max_ms),
                rng.gen_range(0..SAMPLE_FORMS.len()),
                0.75 + rng.gen::<f64>() * 0.2,
            )
        };

        tokio::time::sleep(Duration::from_millis(latency_ms)).await;

        let raw = SAMPLE_FORMS[form_index];
        let extracted_text = if request.preprocessing {
            post_process_text(raw)
        } else {
            raw.to_string()
        };

        let threshold = f64::from(request.confidence_threshold) / 100.0;
        let success = confidence >= threshold && !extracted_text.trim().is_empty();
        let error = if success {
            None
        } else {
            Some(format!(
                "OCR confidence ({}%) below threshold ({}%)",
                (confidence * 100.0).round(),
                request.confidence_threshold
            ))
        };

        Ok(OcrResult {
            extracted_text,
            confidence,
            processing_time: started.elapsed().as_millis() as u64,
            success,
            error,
        })
    }
}
