use crate::math::format::{format_fixed, DECIMALS};
use crate::model::PeakModel;
use crate::prelude::{SpectrumError, SpectrumResult};
use serde::{Deserialize, Serialize};

/// One frame's spectral curve sampled on `[nm_start, nm_stop)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyData {
    pub nm_start: f64,
    pub nm_stop: f64,
    pub intensity: Vec<f64>,
}

impl FrequencyData {
    /// Zeroed curve with `points` samples.
    pub fn zeroed(nm_start: f64, nm_stop: f64, points: usize) -> Self {
        Self {
            nm_start,
            nm_stop,
            intensity: vec![0.0; points],
        }
    }

    pub fn step_nm(&self) -> f64 {
        (self.nm_stop - self.nm_start) / self.intensity.len() as f64
    }

    pub fn wavelength_at(&self, index: usize) -> f64 {
        self.nm_start + self.step_nm() * index as f64
    }

    /// Sample index whose wavelength is closest to `nm`.
    pub fn nearest_index(&self, nm: f64) -> Option<usize> {
        if self.intensity.is_empty() {
            return None;
        }
        let last = self.intensity.len() - 1;
        let position = ((nm - self.nm_start) / self.step_nm()).round();
        Some(position.clamp(0.0, last as f64) as usize)
    }

    /// Adds the peak's contribution onto the existing grid.
    pub fn add_peak(&mut self, peak: &PeakModel) -> SpectrumResult<()> {
        if self.intensity.is_empty() {
            return Err(SpectrumError::Eval("intensity data not allocated".into()));
        }
        let (_, values) = peak.evaluate(self.nm_start, self.nm_stop, self.intensity.len());
        for (sample, value) in self.intensity.iter_mut().zip(values) {
            *sample += value;
        }
        Ok(())
    }

    /// `wavelength\tintensity` lines, one per sample.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for (index, &value) in self.intensity.iter().enumerate() {
            out.push_str(&format_fixed(self.wavelength_at(index), DECIMALS));
            out.push('\t');
            out.push_str(&format_fixed(value, DECIMALS));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PeakShape;

    fn gauss(center_nm: f64, peak_height: f64) -> PeakModel {
        PeakModel {
            shape: PeakShape::Gaussian,
            peak_height,
            center_nm,
            fwhm_nm: 20.0,
        }
    }

    #[test]
    fn add_peak_requires_allocated_grid() {
        let mut data = FrequencyData::zeroed(380.0, 750.0, 0);
        assert!(matches!(
            data.add_peak(&gauss(500.0, 1.0)),
            Err(SpectrumError::Eval(_))
        ));
    }

    #[test]
    fn add_peak_accumulates() {
        let mut data = FrequencyData::zeroed(400.0, 600.0, 200);
        data.add_peak(&gauss(500.0, 1.0)).unwrap();
        data.add_peak(&gauss(500.0, 0.5)).unwrap();
        let center = data.nearest_index(500.0).unwrap();
        assert_eq!(center, 100);
        assert!((data.intensity[center] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn nearest_index_clamps_to_grid() {
        let data = FrequencyData::zeroed(400.0, 500.0, 10);
        assert_eq!(data.nearest_index(0.0), Some(0));
        assert_eq!(data.nearest_index(1000.0), Some(9));
        assert_eq!(data.nearest_index(431.0), Some(3));
        assert_eq!(FrequencyData::zeroed(400.0, 500.0, 0).nearest_index(450.0), None);
    }

    #[test]
    fn csv_lists_wavelength_intensity_pairs() {
        let data = FrequencyData {
            nm_start: 400.0,
            nm_stop: 500.0,
            intensity: vec![0.25, 1.0],
        };
        assert_eq!(
            data.to_csv(),
            "400.000000\t0.250000\n450.000000\t1.000000\n"
        );
    }
}
