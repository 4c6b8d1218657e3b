pub mod keyframe;
pub mod parser;
pub mod peak;

pub use keyframe::{map_frame, KeyframeBlend, PeakModelFile, PeakModelFileRow};
pub use parser::{parse_peak_model_file, parse_peak_model_row};
pub use peak::{PeakModel, PeakShape};
