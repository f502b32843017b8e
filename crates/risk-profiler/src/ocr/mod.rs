//! OCR intake: engine abstraction, mock implementation, and the validated
//! retry loop the image endpoint drives.

mod mock;
mod normalize;
mod validate;

pub use mock::MockOcrEngine;
pub use validate::{validate_ocr, FieldPreview, OcrValidation};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single OCR invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrRequest {
    /// Base64 payload, optionally with a `data:` URL prefix.
    pub image_data: String,
    pub filename: String,
    /// Percent threshold the raw confidence must reach.
    pub confidence_threshold: u8,
    /// Apply the text cleanup pass to the scan output.
    pub preprocessing: bool,
}

/// Raw engine output for one scan attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    #[serde(rename = "extractedText")]
    pub extracted_text: String,
    pub confidence: f64,
    pub processing_time: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of the retrying scan pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedOcrResult {
    #[serde(rename = "extractedText")]
    pub extracted_text: String,
    /// Blended confidence from validation, not the raw engine figure.
    pub confidence: f64,
    pub processing_time: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub attempts: u32,
    #[serde(rename = "bestResult", skip_serializing_if = "Option::is_none")]
    pub best_result: Option<OcrResult>,
}

impl EnhancedOcrResult {
    fn failure(error: String, attempts: u32) -> Self {
        Self {
            extracted_text: String::new(),
            confidence: 0.0,
            processing_time: 0,
            success: false,
            error: Some(error),
            attempts,
            best_result: None,
        }
    }

    /// View as a plain [`OcrResult`] for downstream parsing.
    pub fn as_result(&self) -> OcrResult {
        OcrResult {
            extracted_text: self.extracted_text.clone(),
            confidence: self.confidence,
            processing_time: self.processing_time,
            success: self.success,
            error: self.error.clone(),
        }
    }
}

/// Backend that turns an uploaded image into text.
///
/// The mock engine is the only implementation today; a real OCR service
/// plugs in behind the same trait.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, request: &OcrRequest) -> Result<OcrResult, OcrError>;

    /// Health probes report on this.
    fn ready(&self) -> bool {
        true
    }
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
}

/// Runs OCR with validation and bounded retry.
///
/// Each attempt is validated against the health-form heuristics; the first
/// attempt that passes wins. If none passes, the attempt with the highest
/// blended confidence is returned with `success` cleared.
pub async fn recognize_enhanced<E: OcrEngine + ?Sized>(
    engine: &E,
    request: &OcrRequest,
    max_attempts: u32,
) -> EnhancedOcrResult {
    let budget = max_attempts.max(1);
    let mut best: Option<(OcrResult, OcrValidation)> = None;

    for attempt in 1..=budget {
        let result = match engine.recognize(request).await {
            Ok(result) => result,
            Err(err) => {
                return EnhancedOcrResult::failure(format!("Enhanced OCR failed: {err}"), attempt)
            }
        };

        let validation = validate::validate_ocr(&result);
        if validation.is_valid {
            return EnhancedOcrResult {
                extracted_text: result.extracted_text.clone(),
                confidence: validation.confidence,
                processing_time: result.processing_time,
                success: true,
                error: None,
                attempts: attempt,
                best_result: Some(result),
            };
        }

        let improved = best
            .as_ref()
            .map(|(_, kept)| validation.confidence > kept.confidence)
            .unwrap_or(true);
        if improved {
            best = Some((result, validation));
        }
    }

    let Some((result, validation)) = best else {
        return EnhancedOcrResult::failure("OCR produced no result".to_string(), budget);
    };

    EnhancedOcrResult {
        extracted_text: result.extracted_text.clone(),
        confidence: validation.confidence,
        processing_time: result.processing_time,
        success: false,
        error: result.error.clone(),
        attempts: budget,
        best_result: Some(result),
    }
}
