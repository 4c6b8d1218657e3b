use image::Rgb;
use serde::{Deserialize, Serialize};

pub const RED_WEIGHT: f64 = 0.299;
pub const GREEN_WEIGHT: f64 = 0.587;
pub const BLUE_WEIGHT: f64 = 0.114;

const GAMMA: f64 = 0.8;
const VISIBLE_MIN_NM: f64 = 380.0;
const VISIBLE_MAX_NM: f64 = 780.0;

/// Returned for wavelengths outside the visible range and for degenerate colors.
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// How a spectral curve is turned into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Luma-consistent gray, readable back with [`color_to_intensity`].
    #[default]
    Gray,
    /// Simulated visible color of each wavelength.
    Wavelength,
}

impl ColorMode {
    pub fn from_rgb_flag(rgb: bool) -> Self {
        if rgb {
            ColorMode::Wavelength
        } else {
            ColorMode::Gray
        }
    }

    pub fn colorize(self, nm: f64, intensity: f64) -> Rgb<u8> {
        match self {
            ColorMode::Gray => intensity_to_gray_rgb(intensity),
            ColorMode::Wavelength => wavelength_to_rgb(nm, intensity),
        }
    }
}

/// Approximate display color of monochromatic light, `intensity` in [0, 1].
pub fn wavelength_to_rgb(nm: f64, intensity: f64) -> Rgb<u8> {
    if intensity <= 0.0 || !(VISIBLE_MIN_NM..=VISIBLE_MAX_NM).contains(&nm) {
        return BLACK;
    }

    let (r, g, b) = if nm <= 440.0 {
        (-(nm - 440.0) / (440.0 - 380.0), 0.0, 1.0)
    } else if nm < 490.0 {
        (0.0, (nm - 440.0) / (490.0 - 440.0), 1.0)
    } else if nm <= 510.0 {
        (0.0, 1.0, -(nm - 510.0) / (510.0 - 490.0))
    } else if nm < 580.0 {
        ((nm - 510.0) / (580.0 - 510.0), 1.0, 0.0)
    } else if nm <= 645.0 {
        (1.0, -(nm - 645.0) / (645.0 - 580.0), 0.0)
    } else {
        (1.0, 0.0, 0.0)
    };

    // Vision falls off at both ends of the visible range.
    let attenuation = if nm <= 420.0 {
        0.3 + 0.7 * (nm - 380.0) / (420.0 - 380.0)
    } else if nm <= 700.0 {
        1.0
    } else {
        0.3 + 0.7 * (780.0 - nm) / (780.0 - 700.0)
    };

    let channel = |mix: f64| -> u8 {
        let value = intensity * 255.0 * (mix * attenuation).powf(GAMMA);
        value.clamp(0.0, 255.0) as u8
    };

    let color = Rgb([channel(r), channel(g), channel(b)]);
    if color == BLACK {
        log::trace!("no visible color for {nm:.2}nm at intensity {intensity}");
        return BLACK;
    }
    color
}

/// Luma of an RGB triple, normalized to [0, 1].
pub fn color_to_intensity(color: Rgb<u8>) -> f64 {
    let Rgb([r, g, b]) = color;
    f64::from(r) * RED_WEIGHT / 255.0
        + f64::from(g) * GREEN_WEIGHT / 255.0
        + f64::from(b) * BLUE_WEIGHT / 255.0
}

/// Inverse of [`color_to_intensity`] for achromatic values.
///
/// Channels saturate in order of their luma weight: green carries as much of
/// the intensity as it can, red takes what remains, blue the final residue.
pub fn intensity_to_gray_rgb(intensity: f64) -> Rgb<u8> {
    let quantize = |value: f64, weight: f64| (value * 255.0 / weight).floor().clamp(0.0, 255.0);

    let g = quantize(intensity, GREEN_WEIGHT);
    let after_green = intensity - GREEN_WEIGHT * g / 255.0;

    let r = quantize(after_green, RED_WEIGHT);
    let after_red = after_green - RED_WEIGHT * r / 255.0;

    let b = quantize(after_red, BLUE_WEIGHT);

    Rgb([r as u8, g as u8, b as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_round_trip_recovers_intensity() {
        for step in 0..=1000 {
            let intensity = step as f64 / 1000.0;
            let recovered = color_to_intensity(intensity_to_gray_rgb(intensity));
            assert!(
                (recovered - intensity).abs() < 1e-3,
                "{intensity} -> {recovered}"
            );
            assert!(recovered <= intensity + 1e-9);
        }
    }

    #[test]
    fn gray_fills_green_before_red_and_blue() {
        assert_eq!(intensity_to_gray_rgb(0.0), BLACK);
        let Rgb([r, g, b]) = intensity_to_gray_rgb(0.5);
        assert!(g > 0);
        assert_eq!(r, 0);
        assert!(b <= 1);
        let Rgb([r, g, _]) = intensity_to_gray_rgb(0.8);
        assert_eq!(g, 255);
        assert!(r > 0);
    }

    #[test]
    fn gray_saturates_above_unity() {
        assert_eq!(intensity_to_gray_rgb(2.0), Rgb([255, 255, 255]));
        assert_eq!(intensity_to_gray_rgb(-0.5), BLACK);
    }

    #[test]
    fn luma_of_primaries_matches_weights() {
        assert!((color_to_intensity(Rgb([255, 0, 0])) - RED_WEIGHT).abs() < 1e-12);
        assert!((color_to_intensity(Rgb([0, 255, 0])) - GREEN_WEIGHT).abs() < 1e-12);
        assert!((color_to_intensity(Rgb([0, 0, 255])) - BLUE_WEIGHT).abs() < 1e-12);
        assert!((color_to_intensity(Rgb([255, 255, 255])) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn wavelength_outside_visible_is_black() {
        for nm in [0.0, 379.9, 780.1, 1000.0] {
            assert_eq!(wavelength_to_rgb(nm, 1.0), BLACK);
        }
        for intensity in [0.0, -1.0] {
            assert_eq!(wavelength_to_rgb(550.0, intensity), BLACK);
        }
    }

    #[test]
    fn wavelength_band_anchors() {
        assert_eq!(wavelength_to_rgb(440.0, 1.0), Rgb([0, 0, 255]));
        assert_eq!(wavelength_to_rgb(580.0, 1.0), Rgb([255, 255, 0]));
        assert_eq!(wavelength_to_rgb(645.0, 1.0), Rgb([255, 0, 0]));
        assert_eq!(wavelength_to_rgb(500.0, 1.0), Rgb([0, 255, 146]));
    }

    #[test]
    fn wavelength_edges_are_attenuated() {
        // 0.3^0.8 * 255 = 97.3
        assert_eq!(wavelength_to_rgb(380.0, 1.0), Rgb([97, 0, 97]));
        assert_eq!(wavelength_to_rgb(780.0, 1.0), Rgb([97, 0, 0]));
    }

    #[test]
    fn wavelength_scales_with_intensity() {
        assert_eq!(wavelength_to_rgb(440.0, 0.5), Rgb([0, 0, 127]));
        assert_eq!(wavelength_to_rgb(440.0, 1e-4), BLACK);
    }

    #[test]
    fn color_mode_dispatch() {
        assert_eq!(ColorMode::from_rgb_flag(true), ColorMode::Wavelength);
        assert_eq!(
            ColorMode::Gray.colorize(440.0, 1.0),
            intensity_to_gray_rgb(1.0)
        );
        assert_eq!(ColorMode::Wavelength.colorize(440.0, 1.0), Rgb([0, 0, 255]));
    }
}
