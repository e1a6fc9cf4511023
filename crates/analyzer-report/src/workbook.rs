//! Spreadsheet output for a finished [`CallReport`].
//!
//! The whole workbook is assembled in memory and only then written to disk,
//! through a temporary file in the target directory that is renamed over the
//! target path.

use std::io::Write;
use std::path::Path;

use analyzer_core::error::{AnalyzerError, Result};
use analyzer_core::models::{CallReport, DetailSheet, SummaryRow, SummaryValue, SUMMARY_HEADERS};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook};
use tempfile::NamedTempFile;
use tracing::debug;

pub const SUMMARY_SHEET: &str = "summary";
pub const DETAIL_SHEET: &str = "detail";

/// Column width per character of the longest cell.
pub const WIDTH_FACTOR: f64 = 1.2;

// ── Sheet model ───────────────────────────────────────────────────────────────

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(u64),
}

impl Cell {
    /// Rendered text of the cell, as used for width sizing.
    pub fn rendered(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One worksheet's content: a header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub name: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetData {
    /// The summary sheet: `Metric`, `Value`.
    pub fn summary(rows: &[SummaryRow]) -> Self {
        Self {
            name: SUMMARY_SHEET,
            headers: SUMMARY_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| {
                    let value = match &row.value {
                        SummaryValue::Count(n) => Cell::Number(*n),
                        SummaryValue::Duration(s) => Cell::Text(s.clone()),
                    };
                    vec![Cell::Text(row.metric.to_string()), value]
                })
                .collect(),
        }
    }

    /// The detail sheet: call time, interaction, readable and raw duration.
    pub fn detail(sheet: &DetailSheet) -> Self {
        Self {
            name: DETAIL_SHEET,
            headers: sheet.headers().to_vec(),
            rows: sheet
                .rows
                .iter()
                .map(|row| {
                    vec![
                        Cell::Text(row.call_time.clone()),
                        Cell::Text(row.interaction.clone()),
                        Cell::Text(row.duration_readable.clone()),
                        Cell::Number(row.duration_seconds),
                    ]
                })
                .collect(),
        }
    }

    /// Auto-fit width of every column.
    ///
    /// Width is the character count of the longest rendered cell (header
    /// included) times [`WIDTH_FACTOR`]; `None` when that count is zero.
    pub fn column_widths(&self) -> Vec<Option<f64>> {
        (0..self.headers.len())
            .map(|col| {
                let header_len = self.headers[col].chars().count();
                let max_len = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.rendered().chars().count())
                    .fold(header_len, usize::max);
                (max_len > 0).then(|| max_len as f64 * WIDTH_FACTOR)
            })
            .collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Assemble the two-sheet workbook for `report`.
pub fn build_workbook(report: &CallReport) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, &SheetData::summary(&report.summary))?;
    write_sheet(&mut workbook, &SheetData::detail(&report.detail))?;
    Ok(workbook)
}

/// Write `report` to `path`, replacing any existing file.
///
/// The bytes go to an anonymous temporary file in the target directory that
/// is renamed over `path` once complete; it is removed on any failure.
pub fn write_report(report: &CallReport, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(report)?;
    let bytes = workbook.save_to_buffer()?;

    let write_err = |source: std::io::Error| AnalyzerError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(parent_dir(path)).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_sheet(workbook: &mut Workbook, sheet: &SheetData) -> Result<()> {
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet.name)?;

    for (col, header) in (0 as ColNum..).zip(&sheet.headers) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
    }

    for (row, cells) in (1 as RowNum..).zip(&sheet.rows) {
        for (col, cell) in (0 as ColNum..).zip(cells) {
            match cell {
                Cell::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, *n as f64)?;
                }
            }
        }
    }

    for (col, width) in (0 as ColNum..).zip(sheet.column_widths()) {
        if let Some(width) = width {
            worksheet.set_column_width(col, width)?;
        }
    }

    debug!("Sheet '{}': {} rows", sheet.name, sheet.rows.len());
    Ok(())
}

/// Directory the output lands in; `.` for a bare file name.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
