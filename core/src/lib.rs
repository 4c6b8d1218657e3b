//! Spectrum synthesis core: peak line shapes, keyframed peak animation,
//! and the color encodings used to turn spectral curves into pixels.
//!
//! A scene is a [`model::PeakModelFile`] parsed from a keyframe table. A
//! [`prelude::SpectrumSource`] renders it into one [`spectrum::FrequencyData`]
//! per frame, which [`spectrum::create_image`] rasterizes.

pub mod color;
pub mod math;
pub mod model;
pub mod prelude;
pub mod spectrum;
pub mod telemetry;

pub use prelude::{GridConfig, SpectrumError, SpectrumResult, SpectrumSource};
