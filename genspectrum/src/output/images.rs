use super::frame_rng;
use anyhow::{anyhow, Context};
use image::ImageFormat;
use log::error;
use spectrumcore::color::ColorMode;
use spectrumcore::spectrum::{add_noise, create_image, FrequencyData, FrequencyDataArr};
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::task::JoinSet;

/// Pixel settings shared by the PNG and GIF writers.
#[derive(Debug, Clone, Copy)]
pub struct RasterSettings {
    pub xreso: u32,
    pub yreso: u32,
    pub mode: ColorMode,
    pub noise_amplitude: f64,
    pub seed: u64,
}

impl RasterSettings {
    pub fn render(&self, frame: &FrequencyData, index: usize) -> anyhow::Result<image::RgbImage> {
        let mut img = create_image(frame, self.xreso, self.yreso, self.mode)
            .with_context(|| format!("rasterizing frame {index}"))?;
        add_noise(&mut img, self.noise_amplitude, &mut frame_rng(self.seed, index))
            .with_context(|| format!("adding noise to frame {index}"))?;
        Ok(img)
    }
}

pub fn frame_path(prefix: &str, index: usize) -> PathBuf {
    PathBuf::from(format!("{prefix}_{index}.png"))
}

/// Writes `<prefix>_<frame>.png` for every frame, one blocking task per frame.
///
/// Every frame is attempted; the error names how many failed.
pub fn write_images(
    frames: &FrequencyDataArr,
    prefix: &str,
    settings: RasterSettings,
) -> anyhow::Result<usize> {
    let runtime = TokioBuilder::new_multi_thread()
        .build()
        .context("creating runtime for image encoding")?;

    let failures = runtime.block_on(async {
        let mut tasks = JoinSet::new();
        for (index, frame) in frames.iter().cloned().enumerate() {
            let path = frame_path(prefix, index);
            tasks.spawn_blocking(move || -> anyhow::Result<()> {
                let img = settings.render(&frame, index)?;
                img.save_with_format(&path, ImageFormat::Png)
                    .with_context(|| format!("saving image {}", path.display()))
            });
        }

        let mut failures = 0usize;
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|err| anyhow!("image task aborted: {err}"))
                .and_then(|result| result);
            if let Err(err) = outcome {
                error!("{err:#}");
                failures += 1;
            }
        }
        failures
    });

    if failures > 0 {
        return Err(anyhow!("{failures} of {} images failed", frames.len()));
    }
    Ok(frames.len())
}
