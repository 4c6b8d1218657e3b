use crate::math::format::{join_fixed, DECIMALS};
use crate::model::{KeyframeBlend, PeakModelFile};
use crate::prelude::{GridConfig, SpectrumError, SpectrumResult, SpectrumSource};
use crate::spectrum::frequency::FrequencyData;
use crate::telemetry::log::LogManager;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Rendered frames in playback order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrequencyDataArr {
    pub frames: Vec<FrequencyData>,
}

impl FrequencyDataArr {
    pub fn new(frames: Vec<FrequencyData>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyData> {
        self.frames.iter()
    }

    fn check_uniform(&self) -> SpectrumResult<&FrequencyData> {
        let first = self
            .frames
            .first()
            .ok_or_else(|| SpectrumError::Eval("no frame data".into()))?;
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.nm_start != first.nm_start || frame.nm_stop != first.nm_stop {
                return Err(SpectrumError::Eval(format!(
                    "all frames must share the nm range, frame {index} does not"
                )));
            }
            if frame.intensity.len() != first.intensity.len() {
                return Err(SpectrumError::Eval(format!(
                    "all frames must have the same number of points, frame {index} does not ({} vs {})",
                    first.intensity.len(),
                    frame.intensity.len()
                )));
            }
        }
        Ok(first)
    }

    /// Frames as rows of a (frames × points) matrix.
    pub fn to_matrix(&self) -> SpectrumResult<Array2<f64>> {
        let points = self.check_uniform()?.intensity.len();
        let flat: Vec<f64> = self
            .frames
            .iter()
            .flat_map(|frame| frame.intensity.iter().copied())
            .collect();
        Array2::from_shape_vec((self.frames.len(), points), flat)
            .map_err(|err| SpectrumError::Internal(err.to_string()))
    }

    /// One tab-separated line of intensities per frame.
    pub fn to_grid(&self) -> SpectrumResult<String> {
        let matrix = self.to_matrix()?;
        let mut out = String::new();
        for row in matrix.rows() {
            out.push_str(&join_fixed(&row.to_vec(), DECIMALS));
            out.push('\n');
        }
        Ok(out)
    }
}

impl<'a> IntoIterator for &'a FrequencyDataArr {
    type Item = &'a FrequencyData;
    type IntoIter = std::slice::Iter<'a, FrequencyData>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Keyframed peaks summed onto the grid, one frame per step.
pub struct PeakScene {
    model: PeakModelFile,
    blend: KeyframeBlend,
    logger: LogManager,
}

impl PeakScene {
    pub fn new(model: PeakModelFile, blend: KeyframeBlend) -> Self {
        Self {
            model,
            blend,
            logger: LogManager::new("scene"),
        }
    }

    pub fn model(&self) -> &PeakModelFile {
        &self.model
    }

    fn render_frame(&self, grid: &GridConfig, step: usize) -> SpectrumResult<FrequencyData> {
        let progress = grid.progress(step);
        let mut data = FrequencyData::zeroed(grid.nm_start, grid.nm_stop, grid.points);
        for (index, peak) in self.model.peak_models(progress, self.blend).iter().enumerate() {
            self.logger.record_peak(step, index, peak);
            data.add_peak(peak).map_err(|err| {
                SpectrumError::Eval(format!(
                    "evaluating peak {index} at progress {progress:.6}: {err}"
                ))
            })?;
        }
        Ok(data)
    }
}

impl SpectrumSource for PeakScene {
    fn render(&self, grid: &GridConfig) -> SpectrumResult<FrequencyDataArr> {
        grid.validate()?;
        for (index, row) in self.model.rows.iter().enumerate() {
            row.validate()
                .map_err(|err| SpectrumError::InvalidRow(format!("peak {index}: {err}")))?;
        }
        let frames = (0..grid.steps)
            .map(|step| self.render_frame(grid, step))
            .collect::<SpectrumResult<Vec<_>>>()?;
        self.logger.record(&format!(
            "rendered {} frames of {} peaks",
            frames.len(),
            self.model.rows.len()
        ));
        Ok(FrequencyDataArr::new(frames))
    }
}

/// Calibration profile: a triangle peaking mid-range, identical in every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestTriangle;

impl TestTriangle {
    fn profile(points: usize) -> Vec<f64> {
        let mid = (points / 2) as f64;
        (0..points)
            .map(|i| 1.0 - 2.0 * (mid - i as f64).abs() / points as f64)
            .collect()
    }
}

impl SpectrumSource for TestTriangle {
    fn render(&self, grid: &GridConfig) -> SpectrumResult<FrequencyDataArr> {
        grid.validate()?;
        let frame = FrequencyData {
            nm_start: grid.nm_start,
            nm_stop: grid.nm_stop,
            intensity: Self::profile(grid.points),
        };
        Ok(FrequencyDataArr::new(vec![frame; grid.steps]))
    }
}
