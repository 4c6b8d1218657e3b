use crate::output::animation::write_animation;
use crate::output::csv::{write_csv, CsvLayout};
use crate::output::images::{write_images, RasterSettings};
use crate::output::summary::RenderSummary;
use crate::workflow::config::RunConfig;
use anyhow::{bail, Context};
use log::{error, info};
use spectrumcore::model::PeakModelFile;
use spectrumcore::prelude::SpectrumSource;
use spectrumcore::spectrum::{FrequencyDataArr, PeakScene, TestTriangle};
use spectrumcore::telemetry::{Metrics, MetricsRecorder};
use std::path::{Path, PathBuf};

/// Where the rendered frames go. Each target is optional and independent.
#[derive(Debug, Clone, Default)]
pub struct OutputTargets {
    pub csv: Option<PathBuf>,
    pub csv_layout: CsvLayout,
    pub animation: Option<PathBuf>,
    pub image_prefix: Option<String>,
    pub summary: Option<PathBuf>,
}

#[derive(Clone)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    fn raster_settings(&self) -> RasterSettings {
        RasterSettings {
            xreso: self.config.xreso,
            yreso: self.config.yreso,
            mode: self.config.color_mode,
            noise_amplitude: self.config.noise_amplitude,
            seed: self.config.seed,
        }
    }

    /// Renders every frame from the keyframe table, or the test triangle.
    pub fn render(&self, input: Option<&Path>) -> anyhow::Result<FrequencyDataArr> {
        let grid = self.config.to_grid_config();

        if self.config.test_triangle {
            return TestTriangle
                .render(&grid)
                .context("calculating test triangle");
        }

        let Some(path) = input else {
            bail!("no keyframe table given (use --input or --test-triangle)");
        };
        let model = PeakModelFile::load(path)
            .with_context(|| format!("loading keyframe table {}", path.display()))?;
        info!(
            "loaded {} peaks from {}:\n{}",
            model.rows.len(),
            path.display(),
            model.to_output_format()?
        );

        PeakScene::new(model, self.config.blend)
            .render(&grid)
            .context("calculating spectra")
    }

    /// Attempts every requested output, logging each failure separately.
    pub fn write_outputs(&self, frames: &FrequencyDataArr, targets: &OutputTargets) -> Metrics {
        let metrics = MetricsRecorder::new();
        metrics.record_frames(frames.len());
        let settings = self.raster_settings();

        let report = |what: &str, outcome: anyhow::Result<()>| match outcome {
            Ok(()) => metrics.record_written(),
            Err(err) => {
                error!("{what} output failed: {err:#}");
                metrics.record_failed();
            }
        };

        if let Some(path) = &targets.csv {
            report("csv", write_csv(frames, targets.csv_layout, path));
        }
        if let Some(path) = &targets.animation {
            report(
                "animation",
                write_animation(frames, path, settings, self.config.fps),
            );
        }
        if let Some(prefix) = &targets.image_prefix {
            report(
                "image",
                write_images(frames, prefix, settings).map(|count| {
                    info!("wrote {count} images with prefix {prefix}");
                }),
            );
        }
        if let Some(path) = &targets.summary {
            report("summary", RenderSummary::from_frames(frames).write(path));
        }

        metrics.snapshot()
    }
}
