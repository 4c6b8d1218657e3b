pub mod format;
pub mod stats;

pub use format::{format_fixed, join_fixed, DECIMALS};
pub use stats::StatsHelper;
