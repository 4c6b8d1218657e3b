//! Keyframe table text format.
//!
//! One peak per line: position keyframes, a shape name, the FWHM, then
//! intensity keyframes. `#` starts a comment that runs to the end of the line.
//!
//! ```text
//! # positions    shape  fwhm  intensities
//! 450 520        GAUSS  20    0.2 1.0 0.2
//! 610            L      8     0.5
//! ```

use crate::model::keyframe::{PeakModelFile, PeakModelFileRow};
use crate::model::peak::PeakShape;
use crate::prelude::{SpectrumError, SpectrumResult};
use std::fs;
use std::path::Path;

const COMMENT: &str = "#";

/// Parses a whole keyframe table. Errors carry the 1-based line number.
pub fn parse_peak_model_file(content: &str) -> SpectrumResult<PeakModelFile> {
    let mut rows = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.split(COMMENT).next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let row = parse_peak_model_row(line).map_err(|err| SpectrumError::Parse {
            row: index + 1,
            reason: match err {
                SpectrumError::InvalidRow(reason) => reason,
                other => other.to_string(),
            },
        })?;
        rows.push(row);
    }
    Ok(PeakModelFile::new(rows))
}

/// Parses a single table row.
pub fn parse_peak_model_row(row: &str) -> SpectrumResult<PeakModelFileRow> {
    let mut tokens = row.split_whitespace();

    let mut positions_nm = Vec::new();
    let shape = loop {
        let token = tokens
            .next()
            .ok_or_else(|| SpectrumError::InvalidRow(format!("missing peak shape in '{row}'")))?;
        match token.parse::<f64>() {
            Ok(position) => positions_nm.push(position),
            Err(_) => break token.parse::<PeakShape>()?,
        }
    };
    if positions_nm.is_empty() {
        return Err(SpectrumError::InvalidRow(format!(
            "no position keyframes before shape in '{row}'"
        )));
    }

    let parameter = tokens.next().ok_or_else(|| {
        SpectrumError::InvalidRow(format!("no parameter or intensities in '{row}'"))
    })?;
    let fwhm = parameter.parse::<f64>().map_err(|err| {
        SpectrumError::InvalidRow(format!("invalid parameter '{parameter}' ({err}) in '{row}'"))
    })?;

    let mut intensities = Vec::new();
    for token in tokens.take_while(|&t| t != COMMENT) {
        let value = token.parse::<f64>().map_err(|err| {
            SpectrumError::InvalidRow(format!("invalid intensity '{token}' ({err}) in '{row}'"))
        })?;
        intensities.push(value);
    }
    if intensities.is_empty() {
        return Err(SpectrumError::InvalidRow(format!(
            "no intensity points in '{row}'"
        )));
    }

    Ok(PeakModelFileRow {
        shape,
        positions_nm,
        parameters: vec![fwhm],
        intensities,
    })
}

impl PeakModelFile {
    pub fn load<P: AsRef<Path>>(path: P) -> SpectrumResult<Self> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|source| SpectrumError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        log::debug!("loaded {} ({} bytes)", path_ref.display(), content.len());
        parse_peak_model_file(&content)
    }
}
