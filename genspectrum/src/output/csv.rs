use anyhow::{bail, Context};
use clap::ValueEnum;
use spectrumcore::spectrum::FrequencyDataArr;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CsvLayout {
    /// One line of intensities per frame.
    #[default]
    Grid,
    /// `wavelength<TAB>intensity` lines for a single frame.
    Pairs,
}

pub fn render_csv(frames: &FrequencyDataArr, layout: CsvLayout) -> anyhow::Result<String> {
    match layout {
        CsvLayout::Grid => Ok(frames.to_grid().context("building csv grid")?),
        CsvLayout::Pairs => match frames.frames.as_slice() {
            [single] => Ok(single.to_csv()),
            other => bail!("pairs layout needs exactly one frame, got {}", other.len()),
        },
    }
}

/// Formats the whole table before touching the file.
pub fn write_csv(frames: &FrequencyDataArr, layout: CsvLayout, path: &Path) -> anyhow::Result<()> {
    let text = render_csv(frames, layout)?;
    fs::write(path, text).with_context(|| format!("writing csv {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectrumcore::spectrum::FrequencyData;
    use tempfile::tempdir;

    fn frames(count: usize) -> FrequencyDataArr {
        FrequencyDataArr::new(vec![
            FrequencyData {
                nm_start: 400.0,
                nm_stop: 600.0,
                intensity: vec![0.5, 1.0],
            };
            count
        ])
    }

    #[test]
    fn grid_layout_writes_one_line_per_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&frames(3), CsvLayout::Grid, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.lines().next().unwrap(), "0.500000\t1.000000");
    }

    #[test]
    fn pairs_layout_lists_wavelengths() {
        let text = render_csv(&frames(1), CsvLayout::Pairs).unwrap();
        assert_eq!(text, "400.000000\t0.500000\n500.000000\t1.000000\n");
        assert!(render_csv(&frames(2), CsvLayout::Pairs).is_err());
    }

    #[test]
    fn failed_grid_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut mismatched = frames(2);
        mismatched.frames[1].intensity.push(0.0);
        assert!(write_csv(&mismatched, CsvLayout::Grid, &path).is_err());
        assert!(!path.exists());
    }
}
