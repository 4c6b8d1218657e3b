use anyhow::Context;
use serde::Serialize;
use spectrumcore::math::StatsHelper;
use spectrumcore::spectrum::FrequencyDataArr;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct FramePeak {
    pub frame: usize,
    pub wavelength_nm: f64,
    pub intensity: f64,
    pub rms: f64,
}

/// Per-frame brightest sample of a render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub frames: usize,
    pub points: usize,
    pub nm_start: f64,
    pub nm_stop: f64,
    pub peaks: Vec<FramePeak>,
}

impl RenderSummary {
    pub fn from_frames(frames: &FrequencyDataArr) -> Self {
        let first = frames.frames.first();
        let peaks = frames
            .iter()
            .enumerate()
            .filter_map(|(frame, data)| {
                StatsHelper::argmax(&data.intensity).map(|(index, intensity)| FramePeak {
                    frame,
                    wavelength_nm: data.wavelength_at(index),
                    intensity,
                    rms: StatsHelper::rms(&data.intensity),
                })
            })
            .collect();
        Self {
            frames: frames.len(),
            points: first.map_or(0, |f| f.intensity.len()),
            nm_start: first.map_or(0.0, |f| f.nm_start),
            nm_stop: first.map_or(0.0, |f| f.nm_stop),
            peaks,
        }
    }

    pub fn write(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self).context("serializing render summary")?;
        fs::write(path, json).with_context(|| format!("writing summary {}", path.display()))?;
        Ok(())
    }
}
