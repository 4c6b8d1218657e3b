use crate::spectrum::FrequencyDataArr;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Wavelength grid and frame count shared by every rendered frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub steps: usize,
    pub nm_start: f64,
    pub nm_stop: f64,
    pub points: usize,
}

impl GridConfig {
    pub fn validate(&self) -> SpectrumResult<()> {
        if self.steps < 1 {
            return Err(SpectrumError::Config(format!(
                "invalid number of steps {}",
                self.steps
            )));
        }
        if self.points < 1 {
            return Err(SpectrumError::Config(format!(
                "invalid number of points {}",
                self.points
            )));
        }
        if !(self.nm_start < self.nm_stop) {
            return Err(SpectrumError::Config(format!(
                "wavelength range {}..{} is empty",
                self.nm_start, self.nm_stop
            )));
        }
        Ok(())
    }

    /// Animation progress in [0, 1] for a frame index.
    pub fn progress(&self, step: usize) -> f64 {
        if self.steps > 1 {
            step as f64 / (self.steps - 1) as f64
        } else {
            0.0
        }
    }
}

/// Common error type for spectrum synthesis.
#[derive(thiserror::Error, Debug)]
pub enum SpectrumError {
    #[error("parse error at row {row}: {reason}")]
    Parse { row: usize, reason: String },
    #[error("invalid row: {0}")]
    InvalidRow(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("evaluation failure: {0}")]
    Eval(String),
    #[error("internal failure: {0}")]
    Internal(String),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SpectrumResult<T> = Result<T, SpectrumError>;

/// Anything that can produce one spectral curve per frame on a shared grid.
pub trait SpectrumSource {
    fn render(&self, grid: &GridConfig) -> SpectrumResult<FrequencyDataArr>;
}
