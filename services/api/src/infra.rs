use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::PrometheusHandle;
use risk_profiler::metrics::InMemoryMetrics;
use risk_profiler::ocr::OcrEngine;

use crate::routes::HealthReport;

/// How long a computed health report keeps being served before re-probing.
pub(crate) const HEALTH_CACHE_TTL: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) prometheus: Arc<PrometheusHandle>,
    pub(crate) sink: Arc<InMemoryMetrics>,
    pub(crate) ocr: Arc<dyn OcrEngine>,
    pub(crate) health_cache: Arc<TtlCache<HealthReport>>,
    pub(crate) started_at: Instant,
    pub(crate) environment: &'static str,
}

/// Single-slot cache that forgets its value after a fixed lifetime.
pub(crate) struct TtlCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(Instant, T)>>,
}

impl<T: Clone> TtlCache<T> {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub(crate) fn get(&self) -> Option<T> {
        let slot = self.slot.lock().expect("cache mutex poisoned");
        slot.as_ref()
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    pub(crate) fn put(&self, value: T) {
        let mut slot = self.slot.lock().expect("cache mutex poisoned");
        *slot = Some((Instant::now(), value));
    }
}
