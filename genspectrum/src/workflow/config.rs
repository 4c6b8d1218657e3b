use anyhow::Context;
use serde::{Deserialize, Serialize};
use spectrumcore::color::ColorMode;
use spectrumcore::model::KeyframeBlend;
use spectrumcore::prelude::GridConfig;
use std::fs;
use std::path::Path;

/// Rendering settings, either from the command line or a YAML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub nm_start: f64,
    pub nm_stop: f64,
    pub duration_s: f64,
    pub fps: f64,
    /// Explicit frame count; 0 derives it from duration and fps.
    pub frames: usize,
    pub xreso: u32,
    pub yreso: u32,
    pub color_mode: ColorMode,
    pub noise_amplitude: f64,
    pub seed: u64,
    pub test_triangle: bool,
    pub blend: KeyframeBlend,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nm_start: 380.0,
            nm_stop: 750.0,
            duration_s: 10.0,
            fps: 15.0,
            frames: 0,
            xreso: 800,
            yreso: 600,
            color_mode: ColorMode::Gray,
            noise_amplitude: 0.0,
            seed: 0,
            test_triangle: false,
            blend: KeyframeBlend::Independent,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading run config {}", path_ref.display()))?;
        let config: RunConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing run config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn steps(&self) -> usize {
        if self.frames > 0 {
            self.frames
        } else {
            // Saturating cast: negative or NaN products give 0 steps.
            (self.duration_s * self.fps) as usize
        }
    }

    pub fn to_grid_config(&self) -> GridConfig {
        GridConfig {
            steps: self.steps(),
            nm_start: self.nm_start,
            nm_stop: self.nm_stop,
            points: self.xreso as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn steps_follow_duration_unless_frames_given() {
        let cfg = RunConfig::default();
        assert_eq!(cfg.steps(), 150);
        let cfg = RunConfig {
            frames: 7,
            ..RunConfig::default()
        };
        assert_eq!(cfg.steps(), 7);
        let cfg = RunConfig {
            duration_s: -1.0,
            ..RunConfig::default()
        };
        assert_eq!(cfg.steps(), 0);
    }

    #[test]
    fn grid_uses_horizontal_resolution_as_points() {
        let grid = RunConfig::default().to_grid_config();
        assert_eq!(grid.points, 800);
        assert_eq!(grid.nm_start, 380.0);
        assert_eq!(grid.nm_stop, 750.0);
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"nm_start: 400\nframes: 3\ncolor_mode: wavelength\nblend: legacy_crossed\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = RunConfig::load(&path).unwrap();
        assert_eq!(cfg.nm_start, 400.0);
        assert_eq!(cfg.steps(), 3);
        assert_eq!(cfg.color_mode, ColorMode::Wavelength);
        assert_eq!(cfg.blend, KeyframeBlend::LegacyCrossed);
        assert_eq!(cfg.xreso, 800);
    }

    #[test]
    fn config_load_reports_path_on_failure() {
        let err = RunConfig::load("/nonexistent/run.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/run.yaml"));
    }
}
