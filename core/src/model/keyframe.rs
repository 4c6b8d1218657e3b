use crate::math::format::{join_fixed, DECIMALS};
use crate::model::peak::{PeakModel, PeakShape};
use crate::prelude::{SpectrumError, SpectrumResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which interpolation fraction drives which keyframe track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeBlend {
    /// Positions and intensities each blend with their own fraction.
    #[default]
    Independent,
    /// Height blends with the position fraction and center with the
    /// intensity fraction. Matches spectra rendered by earlier releases;
    /// differs from `Independent` only when the tracks have different
    /// keyframe counts.
    LegacyCrossed,
}

/// Maps a progress ratio onto a keyframe track of length `len`.
///
/// Returns the lower keyframe index and the blend fraction towards the next.
pub fn map_frame(progress: f64, len: usize) -> (usize, f64) {
    let last = len.saturating_sub(1) as f64;
    let raw = ((len + 1) as f64 * progress).max(0.0).min(last);
    let index = raw.floor();
    (index as usize, raw - index)
}

struct Track {
    index: usize,
    next: usize,
    fraction: f64,
}

impl Track {
    fn locate(progress: f64, len: usize) -> Self {
        let (index, fraction) = map_frame(progress, len);
        Self {
            index,
            next: (index + 1).min(len.saturating_sub(1)),
            fraction,
        }
    }

    fn blend(&self, keyframes: &[f64], fraction: f64) -> f64 {
        keyframes[self.index] * (1.0 - fraction) + keyframes[self.next] * fraction
    }
}

/// One animated peak: keyframed center and height, fixed shape and width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakModelFileRow {
    pub shape: PeakShape,
    pub positions_nm: Vec<f64>,
    /// Shape parameters; currently only the FWHM.
    pub parameters: Vec<f64>,
    pub intensities: Vec<f64>,
}

impl PeakModelFileRow {
    pub fn validate(&self) -> SpectrumResult<()> {
        if self.positions_nm.is_empty() {
            return Err(SpectrumError::InvalidRow("no position keyframes".into()));
        }
        if self.parameters.len() != 1 {
            return Err(SpectrumError::InvalidRow(format!(
                "expected 1 parameter, got {}",
                self.parameters.len()
            )));
        }
        if self.intensities.is_empty() {
            return Err(SpectrumError::InvalidRow("no intensity keyframes".into()));
        }
        Ok(())
    }

    pub fn fwhm_nm(&self) -> f64 {
        self.parameters[0]
    }

    /// Peak at a point of the animation, `progress` in [0, 1].
    pub fn peak_model(&self, progress: f64, blend: KeyframeBlend) -> PeakModel {
        let position = Track::locate(progress, self.positions_nm.len());
        let intensity = Track::locate(progress, self.intensities.len());

        let (height_fraction, center_fraction) = match blend {
            KeyframeBlend::Independent => (intensity.fraction, position.fraction),
            KeyframeBlend::LegacyCrossed => (position.fraction, intensity.fraction),
        };

        PeakModel {
            shape: self.shape,
            peak_height: intensity.blend(&self.intensities, height_fraction),
            center_nm: position.blend(&self.positions_nm, center_fraction),
            fwhm_nm: self.fwhm_nm(),
        }
    }
}

impl fmt::Display for PeakModelFileRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            join_fixed(&self.positions_nm, DECIMALS),
            self.shape,
            join_fixed(&self.parameters, DECIMALS),
            join_fixed(&self.intensities, DECIMALS)
        )
    }
}

/// The complete animated scene, one row per peak.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeakModelFile {
    pub rows: Vec<PeakModelFileRow>,
}

impl PeakModelFile {
    pub fn new(rows: Vec<PeakModelFileRow>) -> Self {
        Self { rows }
    }

    pub fn peak_models(&self, progress: f64, blend: KeyframeBlend) -> Vec<PeakModel> {
        self.rows
            .iter()
            .map(|row| row.peak_model(progress, blend))
            .collect()
    }

    /// Canonical text form, one row per line, parseable again.
    pub fn to_output_format(&self) -> SpectrumResult<String> {
        let mut out = String::new();
        for (index, row) in self.rows.iter().enumerate() {
            row.validate().map_err(|err| {
                SpectrumError::InvalidRow(format!("peak data index {index}: {err}"))
            })?;
            out.push_str(&row.to_string());
            out.push('\n');
        }
        Ok(out)
    }
}
