pub mod frequency;
pub mod raster;
pub mod scene;

pub use frequency::FrequencyData;
pub use raster::{add_noise, create_image};
pub use scene::{FrequencyDataArr, PeakScene, TestTriangle};
