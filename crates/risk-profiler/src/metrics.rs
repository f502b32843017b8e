//! Lightweight usage counters the service keeps alongside the Prometheus
//! layer, exposed through the JSON metrics endpoint.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Window of response-time samples kept for averaging.
const RESPONSE_TIME_WINDOW: usize = 100;

/// One observation reported by a handler or the ingestion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricEvent {
    ApiCall(u64),
    OcrProcessing(u64),
    Error { count: u64, message: Option<String> },
    ResponseTime(u64),
}

impl MetricEvent {
    /// Maps the wire names accepted by the metrics ingestion endpoint.
    pub fn from_name(name: &str, value: u64, message: Option<String>) -> Option<Self> {
        match name {
            "api_call" => Some(Self::ApiCall(value)),
            "ocr_processing" => Some(Self::OcrProcessing(value)),
            "error" => Some(Self::Error {
                count: value,
                message,
            }),
            "response_time" => Some(Self::ResponseTime(value)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseTimeStats {
    pub avg_ms: u64,
    pub samples: usize,
}

/// Point-in-time view of every counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub api_calls_total: u64,
    pub ocr_processing_total: u64,
    pub errors_total: u64,
    pub response_times: ResponseTimeStats,
    pub last_error: Option<String>,
}

/// Destination for [`MetricEvent`]s.
pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricEvent);
    fn snapshot(&self) -> MetricsSnapshot;
}

#[derive(Debug, Default)]
struct MetricsState {
    api_calls: u64,
    ocr_processing: u64,
    errors: u64,
    response_times: VecDeque<u64>,
    last_error: Option<String>,
}

/// Process-local sink; counters reset on restart.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    state: Mutex<MetricsState>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for InMemoryMetrics {
    fn record(&self, event: MetricEvent) {
        let mut state = self.state.lock().expect("metrics state mutex poisoned");
        match event {
            MetricEvent::ApiCall(count) => state.api_calls += count,
            MetricEvent::OcrProcessing(count) => state.ocr_processing += count,
            MetricEvent::Error { count, message } => {
                state.errors += count;
                if message.is_some() {
                    state.last_error = message;
                }
            }
            MetricEvent::ResponseTime(ms) => {
                state.response_times.push_back(ms);
                if state.response_times.len() > RESPONSE_TIME_WINDOW {
                    state.response_times.pop_front();
                }
            }
        }
    }

    fn snapshot(&self) -> MetricsSnapshot {
        let state = self.state.lock().expect("metrics state mutex poisoned");
        let samples = state.response_times.len();
        let avg_ms = if samples == 0 {
            0
        } else {
            let total: u64 = state.response_times.iter().sum();
            (total as f64 / samples as f64).round() as u64
        };

        MetricsSnapshot {
            api_calls_total: state.api_calls,
            ocr_processing_total: state.ocr_processing,
            errors_total: state.errors,
            response_times: ResponseTimeStats { avg_ms, samples },
            last_error: state.last_error.clone(),
        }
    }
}
