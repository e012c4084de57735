//! CSV storage for labeled datasets.
//!
//! The file layout is fixed: a header row with the eight feature columns in
//! canonical order followed by `energy_score`, then one record per line.

use super::LabeledRecord;
use crate::error::MlError;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES, FeatureRecord, LABEL_COLUMN};
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

const DELIMITER: char = ',';

fn header() -> String {
    let mut columns: Vec<&str> = FEATURE_NAMES.to_vec();
    columns.push(LABEL_COLUMN);
    columns.join(",")
}

/// Render records as CSV text, header included.
pub fn to_csv_string(records: &[LabeledRecord]) -> String {
    let mut out = header();
    out.push('\n');
    for r in records {
        let f = &r.features;
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            f.age,
            f.menopause_flag,
            f.cycle_phase,
            f.sleep_hours,
            f.mood,
            f.stress,
            f.symptoms,
            f.activity,
            r.energy_score
        );
    }
    out
}

/// Parse CSV text produced by [`to_csv_string`] (or any file with the same columns).
pub fn parse_csv(content: &str) -> Result<Vec<LabeledRecord>, MlError> {
    let mut lines = content.lines().enumerate();

    let (_, header_line) = lines
        .next()
        .ok_or_else(|| MlError::dataset("Empty CSV file"))?;
    let columns: Vec<&str> = header_line
        .split(DELIMITER)
        .map(|s| s.trim().trim_matches('"'))
        .collect();
    let expected = header();
    let expected: Vec<&str> = expected.split(',').collect();
    if columns != expected {
        return Err(MlError::dataset(format!(
            "Unexpected CSV header: expected [{}], found [{}]",
            expected.join(", "),
            columns.join(", ")
        )));
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let cells: Vec<&str> = line
            .split(DELIMITER)
            .map(|s| s.trim().trim_matches('"'))
            .collect();
        if cells.len() != FEATURE_COUNT + 1 {
            return Err(MlError::dataset(format!(
                "Line {line_no}: expected {} columns, found {}",
                FEATURE_COUNT + 1,
                cells.len()
            )));
        }

        let features = FeatureRecord {
            age: cell(&cells, 0, line_no)?,
            menopause_flag: cell(&cells, 1, line_no)?,
            cycle_phase: cell(&cells, 2, line_no)?,
            sleep_hours: cell(&cells, 3, line_no)?,
            mood: cell(&cells, 4, line_no)?,
            stress: cell(&cells, 5, line_no)?,
            symptoms: cell(&cells, 6, line_no)?,
            activity: cell(&cells, 7, line_no)?,
        };
        records.push(LabeledRecord {
            features,
            energy_score: cell(&cells, FEATURE_COUNT, line_no)?,
        });
    }

    Ok(records)
}

fn cell<T: FromStr>(cells: &[&str], col: usize, line_no: usize) -> Result<T, MlError> {
    let raw = cells[col];
    raw.parse().map_err(|_| {
        let name = FEATURE_NAMES.get(col).copied().unwrap_or(LABEL_COLUMN);
        MlError::dataset(format!("Line {line_no}: invalid value '{raw}' for '{name}'"))
    })
}

/// Write records to `path`, replacing any existing file.
pub fn write_csv(path: &Path, records: &[LabeledRecord]) -> Result<(), MlError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_csv_string(records))?;
    tracing::info!(path = %path.display(), rows = records.len(), "Dataset written");
    Ok(())
}

/// Read a labeled dataset from `path`.
///
/// A missing file is reported as [`MlError::NotFound`].
pub fn read_csv(path: &Path) -> Result<Vec<LabeledRecord>, MlError> {
    let content = std::fs::read_to_string(path).map_err(|e| MlError::from_io_at(e, path))?;
    let records = parse_csv(&content)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "Dataset loaded");
    Ok(records)
}
