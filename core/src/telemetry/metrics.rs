use serde::Serialize;
use std::sync::Mutex;

/// Run counters, shared between output writers.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub frames_rendered: usize,
    pub outputs_written: usize,
    pub outputs_failed: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_frames(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames_rendered += count;
        }
    }

    pub fn record_written(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.outputs_written += 1;
        }
    }

    pub fn record_failed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.outputs_failed += 1;
        }
    }

    pub fn snapshot(&self) -> Metrics {
        self.inner.lock().map(|m| *m).unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
