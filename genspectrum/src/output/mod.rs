pub mod animation;
pub mod csv;
pub mod images;
pub mod summary;

use rand::{rngs::StdRng, SeedableRng};

/// Noise generator for one frame; the same seed and frame give the same noise.
pub(crate) fn frame_rng(seed: u64, frame: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(frame as u64))
}
