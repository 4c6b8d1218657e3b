use crate::prelude::{SpectrumError, SpectrumResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line shape of a spectral peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeakShape {
    Gaussian,
    Lorentzian,
    HyperbolicSecant,
}

impl FromStr for PeakShape {
    type Err = SpectrumError;

    fn from_str(token: &str) -> SpectrumResult<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GAUSS" | "GAUSSIAN" | "G" => Ok(PeakShape::Gaussian),
            "LORENTZ" | "L" => Ok(PeakShape::Lorentzian),
            "HYPSEC" => Ok(PeakShape::HyperbolicSecant),
            _ => Err(SpectrumError::InvalidRow(format!(
                "unknown peak shape '{token}'"
            ))),
        }
    }
}

impl fmt::Display for PeakShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PeakShape::Gaussian => "GAUSS",
            PeakShape::Lorentzian => "LORENTZ",
            PeakShape::HyperbolicSecant => "HYPSEC",
        };
        f.write_str(name)
    }
}

/// A single line shape at a fixed height, center and width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakModel {
    pub shape: PeakShape,
    pub peak_height: f64,
    pub center_nm: f64,
    /// Full width at half maximum.
    pub fwhm_nm: f64,
}

impl PeakModel {
    /// Samples the peak on `n` points spaced uniformly over `[nm_from, nm_to)`.
    ///
    /// Returns the wavelength axis and the matching peak values.
    pub fn evaluate(&self, nm_from: f64, nm_to: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
        let axis: Vec<f64> = (0..n)
            .map(|i| nm_from + (nm_to - nm_from) * i as f64 / n as f64)
            .collect();

        let height = self.peak_height;
        let values = match self.shape {
            PeakShape::Gaussian => {
                let std = self.fwhm_nm / (2.0 * (2.0 * std::f64::consts::LN_2).sqrt());
                let variance = std * std;
                self.sample(&axis, |x| height * (-0.5 * x * x / variance).exp())
            }
            PeakShape::Lorentzian => {
                let fwhm = self.fwhm_nm;
                self.sample(&axis, |x| {
                    let u = 2.0 * x / fwhm;
                    height / (1.0 + u * u)
                })
            }
            PeakShape::HyperbolicSecant => {
                let scale = 2.0 * (2.0 + 3f64.sqrt()).ln() / self.fwhm_nm;
                self.sample(&axis, |x| height / (x * scale).cosh())
            }
        };

        (axis, values)
    }

    fn sample(&self, axis: &[f64], shape: impl Fn(f64) -> f64) -> Vec<f64> {
        axis.iter().map(|&nm| shape(nm - self.center_nm)).collect()
    }
}

impl fmt::Display for PeakModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.4}@{:.2}nm±{:.3}",
            self.shape,
            self.peak_height,
            self.center_nm,
            self.fwhm_nm / 2.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(shape: PeakShape) -> PeakModel {
        PeakModel {
            shape,
            peak_height: 2.0,
            center_nm: 500.0,
            fwhm_nm: 10.0,
        }
    }

    #[test]
    fn shape_parsing_accepts_aliases_case_insensitively() {
        for token in ["GAUSS", "gaussian", "g"] {
            assert_eq!(token.parse::<PeakShape>().unwrap(), PeakShape::Gaussian);
        }
        for token in ["Lorentz", "L"] {
            assert_eq!(token.parse::<PeakShape>().unwrap(), PeakShape::Lorentzian);
        }
        assert_eq!(
            "hypsec".parse::<PeakShape>().unwrap(),
            PeakShape::HyperbolicSecant
        );
        assert!("FOO".parse::<PeakShape>().is_err());
    }

    #[test]
    fn axis_is_half_open() {
        let (axis, values) = peak(PeakShape::Gaussian).evaluate(400.0, 500.0, 4);
        assert_eq!(axis, vec![400.0, 425.0, 450.0, 475.0]);
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn every_shape_peaks_at_center_and_halves_at_fwhm() {
        for shape in [
            PeakShape::Gaussian,
            PeakShape::Lorentzian,
            PeakShape::HyperbolicSecant,
        ] {
            // Samples at 495, 500 and 505nm.
            let (_, values) = peak(shape).evaluate(495.0, 510.0, 3);
            assert!((values[1] - 2.0).abs() < 1e-12, "{shape}");
            assert!((values[0] - 1.0).abs() < 1e-9, "{shape} {}", values[0]);
            assert!((values[2] - 1.0).abs() < 1e-9, "{shape} {}", values[2]);
        }
    }

    #[test]
    fn gaussian_is_symmetric_about_center() {
        let model = peak(PeakShape::Gaussian);
        let n = 200;
        let (axis, values) = model.evaluate(490.0, 510.0, n);
        let center = n / 2;
        assert!((axis[center] - 500.0).abs() < 1e-9);
        for k in 1..center {
            assert!((values[center - k] - values[center + k]).abs() < 1e-9);
        }
    }

    #[test]
    fn empty_grid_yields_empty_vectors() {
        let (axis, values) = peak(PeakShape::Lorentzian).evaluate(400.0, 500.0, 0);
        assert!(axis.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn display_shows_half_width() {
        assert_eq!(
            peak(PeakShape::HyperbolicSecant).to_string(),
            "HYPSEC 2.0000@500.00nm±5.000"
        );
    }
}
