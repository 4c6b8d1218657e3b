pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f64).sqrt()
    }

    /// Index and value of the first maximum, ignoring NaN samples.
    pub fn argmax(samples: &[f64]) -> Option<(usize, f64)> {
        samples
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .fold(None, |best, (i, v)| match best {
                Some((_, top)) if top >= v => best,
                _ => Some((i, v)),
            })
    }
}
