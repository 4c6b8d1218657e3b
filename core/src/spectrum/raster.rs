use crate::color::ColorMode;
use crate::prelude::{SpectrumError, SpectrumResult};
use crate::spectrum::frequency::FrequencyData;
use image::RgbImage;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Rasterizes a curve into vertical bands, one color per pixel column.
///
/// Column `x` shows the sample at `x / xreso` of the grid, colored for the
/// wavelength at the same fraction of `[nm_start, nm_stop]`.
pub fn create_image(
    data: &FrequencyData,
    xreso: u32,
    yreso: u32,
    mode: ColorMode,
) -> SpectrumResult<RgbImage> {
    if data.intensity.is_empty() {
        return Err(SpectrumError::Eval("cannot rasterize an empty curve".into()));
    }
    if xreso == 0 || yreso == 0 {
        return Err(SpectrumError::Config(format!(
            "invalid resolution {xreso}x{yreso}"
        )));
    }

    let last = data.intensity.len() - 1;
    let columns: Vec<_> = (0..xreso)
        .map(|x| {
            let ratio = f64::from(x) / f64::from(xreso);
            let index = ((ratio * data.intensity.len() as f64) as usize).min(last);
            let nm = data.nm_start + ratio * (data.nm_stop - data.nm_start);
            mode.colorize(nm, data.intensity[index])
        })
        .collect();

    Ok(RgbImage::from_fn(xreso, yreso, |x, _| columns[x as usize]))
}

/// Adds independent Gaussian noise to every channel of every pixel.
pub fn add_noise<R: Rng + ?Sized>(
    image: &mut RgbImage,
    amplitude: f64,
    rng: &mut R,
) -> SpectrumResult<()> {
    if amplitude.is_nan() || amplitude < 0.0 {
        return Err(SpectrumError::Config(format!(
            "invalid noise amplitude {amplitude}"
        )));
    }
    if amplitude == 0.0 {
        return Ok(());
    }
    let normal =
        Normal::new(0.0, amplitude).map_err(|err| SpectrumError::Config(err.to_string()))?;
    for pixel in image.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            let noisy = f64::from(*channel) + normal.sample(rng);
            *channel = noisy.clamp(0.0, 255.0) as u8;
        }
    }
    Ok(())
}
