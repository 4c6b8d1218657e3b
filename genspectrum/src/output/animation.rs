use super::images::RasterSettings;
use anyhow::{bail, Context};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame};
use spectrumcore::spectrum::FrequencyDataArr;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Encodes all frames as a looping GIF at `fps`.
///
/// The animation is encoded in memory and written in one go.
pub fn write_animation(
    frames: &FrequencyDataArr,
    path: &Path,
    settings: RasterSettings,
    fps: f64,
) -> anyhow::Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        bail!("invalid frame rate {fps}");
    }
    let delay = Delay::from_saturating_duration(Duration::from_secs_f64(1.0 / fps));

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder
            .set_repeat(Repeat::Infinite)
            .context("configuring animation loop")?;
        for (index, frame) in frames.iter().enumerate() {
            let rgba = DynamicImage::ImageRgb8(settings.render(frame, index)?).into_rgba8();
            encoder
                .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
                .with_context(|| format!("encoding animation frame {index}"))?;
        }
    }

    fs::write(path, buffer).with_context(|| format!("writing animation {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;
    use spectrumcore::color::ColorMode;
    use spectrumcore::spectrum::FrequencyData;
    use std::io::BufReader;
    use tempfile::tempdir;

    fn settings() -> RasterSettings {
        RasterSettings {
            xreso: 8,
            yreso: 2,
            mode: ColorMode::Wavelength,
            noise_amplitude: 5.0,
            seed: 3,
        }
    }

    fn frames(count: usize) -> FrequencyDataArr {
        FrequencyDataArr::new(vec![FrequencyData::zeroed(400.0, 600.0, 8); count])
    }

    #[test]
    fn writes_one_gif_frame_per_spectrum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.gif");
        write_animation(&frames(3), &path, settings(), 15.0).unwrap();

        let file = BufReader::new(fs::File::open(&path).unwrap());
        let decoded = GifDecoder::new(file)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].buffer().dimensions(), (8, 2));
    }

    #[test]
    fn rejects_non_positive_frame_rate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.gif");
        assert!(write_animation(&frames(1), &path, settings(), 0.0).is_err());
        assert!(!path.exists());
    }
}
