//! Fixed-precision text output shared by the CSV writers and row dumps.
//!
//! Rust's `{:.N}` formatting rounds the exact binary value to the nearest
//! decimal, so golden outputs stay stable across platforms.

pub const DECIMALS: usize = 6;

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Tab-separated values at a fixed number of decimals.
pub fn join_fixed(values: &[f64], decimals: usize) -> String {
    values
        .iter()
        .map(|&v| format_fixed(v, decimals))
        .collect::<Vec<_>>()
        .join("\t")
}
