//! CSV loading for grouped observations
//!
//! Supports files where:
//! - Each row is `group,value` (e.g. `AFR,12.5`)
//! - A single-column row is a bare value and lands in group `"all"`
//! - The first row can be a header (automatically detected)
//! - Blank lines and lines starting with `#` are skipped

use crate::core::{DensityError, Result};
use crate::data::GroupedSamples;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Group used for rows that carry no group column
pub const DEFAULT_GROUP: &str = "all";

impl GroupedSamples {
    /// Load grouped observations from a CSV file
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(DensityError::IoError)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Load grouped observations from a reader, detecting a header row
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, true)
    }

    /// Load grouped observations from a reader with explicit header control
    ///
    /// With `auto_detect_header` the first meaningful row is skipped when none
    /// of its fields is numeric. A skipped row whose label column names a group
    /// that appears in the data was a malformed observation, not a header, and
    /// is reported as a parse error.
    pub fn from_reader_with_options<R: BufRead>(
        reader: R,
        auto_detect_header: bool,
    ) -> Result<Self> {
        let mut samples = GroupedSamples::new();
        let mut seen_first_row = false;
        let mut header: Option<(usize, String)> = None;

        for (line_idx, line) in reader.lines().enumerate() {
            let line = line.map_err(DensityError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if !seen_first_row {
                seen_first_row = true;
                if auto_detect_header && is_header_line(line) {
                    debug!("Skipping header row on line {}: {line}", line_idx + 1);
                    header = Some((line_idx + 1, line.to_string()));
                    continue;
                }
            }

            let (group, value) = parse_data_line(line, line_idx + 1)?;
            samples.push(group, value);
        }

        if let Some((line_no, line)) = header {
            check_header_labels(&samples, &line, line_no)?;
        }

        if samples.is_empty() {
            return Err(DensityError::EmptyDataset);
        }

        Ok(samples)
    }
}

/// A header row has no numeric field
fn is_header_line(line: &str) -> bool {
    line.split(',')
        .all(|field| field.trim().parse::<f64>().is_err())
}

/// Reject a header whose label column is one of the loaded groups
fn check_header_labels(samples: &GroupedSamples, line: &str, line_no: usize) -> Result<()> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();

    match fields.as_slice() {
        [group, value] if samples.get(group).is_some() => Err(DensityError::ParseError(
            format!("Line {line_no}: invalid value: {value}"),
        )),
        _ => Ok(()),
    }
}

/// Parse a data row into `(group, value)`
fn parse_data_line(line: &str, line_no: usize) -> Result<(&str, f64)> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();

    let (group, value_str) = match fields.as_slice() {
        [value] => (DEFAULT_GROUP, *value),
        [group, value] => (*group, *value),
        _ => {
            return Err(DensityError::ParseError(format!(
                "Line {line_no}: expected `group,value`, got {} fields",
                fields.len()
            )))
        }
    };

    if group.is_empty() {
        return Err(DensityError::ParseError(format!(
            "Line {line_no}: empty group label"
        )));
    }

    let value = value_str.parse::<f64>().map_err(|_| {
        DensityError::ParseError(format!("Line {line_no}: invalid value: {value_str}"))
    })?;

    if !value.is_finite() {
        return Err(DensityError::ParseError(format!(
            "Line {line_no}: value must be finite, got {value_str}"
        )));
    }

    Ok((group, value))
}
