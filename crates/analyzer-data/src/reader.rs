//! CSV discovery and loading for the call log analyzer.
//!
//! Expands the user's glob patterns, reads every matched call-log export and
//! concatenates the rows into one [`CallRecord`] list in file order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use analyzer_core::error::{AnalyzerError, Result};
use analyzer_core::models::{CallDirection, CallRecord};
use serde::Deserialize;
use tracing::{debug, warn};

pub const COL_DIRECTION: &str = "Direction";
pub const COL_TO: &str = "To";
pub const COL_FROM: &str = "From";
pub const COL_DURATION: &str = "Duration (in seconds)";
pub const COL_CREATED_AT: &str = "Created at";

/// Columns every export must carry. Other columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_DIRECTION,
    COL_TO,
    COL_FROM,
    COL_DURATION,
    COL_CREATED_AT,
];

/// One raw CSV row; empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Direction")]
    direction: Option<String>,
    #[serde(rename = "To")]
    to: Option<String>,
    #[serde(rename = "From")]
    from: Option<String>,
    #[serde(rename = "Duration (in seconds)")]
    duration: Option<String>,
    #[serde(rename = "Created at")]
    created_at: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Expand `patterns` into the list of files to read.
///
/// Patterns are expanded in the order given; each pattern's matches come out
/// sorted. A file matched by more than one pattern is kept once, at its first
/// position. Directories are skipped.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let paths = glob::glob(pattern).map_err(|source| AnalyzerError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut matched = 0usize;
        for entry in paths {
            let path = entry?;
            if path.is_dir() {
                debug!("Skipping directory {}", path.display());
                continue;
            }
            matched += 1;
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
        debug!("Pattern \"{}\" matched {} files", pattern, matched);
    }

    Ok(files)
}

/// Load and concatenate the call records of every file matched by
/// `patterns`.
///
/// Returns an empty list (after logging a warning) when no file matches.
/// Any read or parse failure aborts the whole load.
pub fn load_call_records<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<CallRecord>> {
    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        warn!("No CSV files found for the given patterns.");
        return Ok(Vec::new());
    }

    debug!("Found {} files to process.", files.len());

    let mut records: Vec<CallRecord> = Vec::new();
    for path in &files {
        records.extend(read_call_csv(path)?);
    }

    debug!(
        "Loaded {} rows from {} files",
        records.len(),
        files.len()
    );

    Ok(records)
}

/// Read one call-log export.
///
/// The header must contain every column in [`REQUIRED_COLUMNS`].
pub fn read_call_csv(path: &Path) -> Result<Vec<CallRecord>> {
    let file = std::fs::File::open(path).map_err(|source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source: csv::Error| AnalyzerError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers = reader.headers().map_err(csv_err)?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AnalyzerError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut records: Vec<CallRecord> = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row.map_err(csv_err)?;
        records.push(CallRecord {
            direction: row.direction.as_deref().map(CallDirection::from),
            caller: row.from,
            callee: row.to,
            duration_seconds: parse_duration(row.duration.as_deref(), path)?,
            created_at: row.created_at,
        });
    }

    debug!("File {}: {} rows", path.display(), records.len());

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Parse a `Duration (in seconds)` cell.
///
/// Empty cells and `NaN` are `None`. Integral floats (`"65.0"`) are accepted
/// and fractional seconds are truncated. Negative or non-numeric values are
/// errors.
fn parse_duration(raw: Option<&str>, path: &Path) -> Result<Option<u64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Some(secs));
    }

    let invalid = || AnalyzerError::InvalidDuration {
        path: path.to_path_buf(),
        value: raw.to_string(),
    };

    let value: f64 = raw.parse().map_err(|_| invalid())?;
    if value.is_nan() {
        return Ok(None);
    }
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(Some(value.trunc() as u64))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
