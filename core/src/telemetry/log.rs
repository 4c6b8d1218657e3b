use crate::model::PeakModel;
use log::{debug, info};

/// Thin wrapper over the `log` facade with a fixed record format per event.
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    pub fn record_peak(&self, step: usize, index: usize, peak: &PeakModel) {
        debug!("[{}] frame {} peak {}: {}", self.scope, step, index, peak);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("spectrum")
    }
}
