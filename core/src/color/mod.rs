pub mod conversion;

pub use conversion::{
    color_to_intensity, intensity_to_gray_rgb, wavelength_to_rgb, ColorMode, BLACK,
};
