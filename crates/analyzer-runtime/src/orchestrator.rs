//! Call log analysis orchestrator.
//!
//! Runs the loader, filter, aggregator, detail formatter and writer in order
//! for one user, stopping early when there is nothing to report.

use std::path::{Path, PathBuf};

use analyzer_core::error::Result;
use analyzer_core::models::{CallRecord, CallReport};
use analyzer_core::settings::AnalyzerConfig;
use analyzer_data::aggregator::summarize;
use analyzer_data::detail::DetailFormatter;
use analyzer_data::filter::CallFilter;
use analyzer_data::reader::load_call_records;
use analyzer_report::write_report;
use tracing::{info, warn};

// ── Public types ──────────────────────────────────────────────────────────────

/// Terminal state of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// No rows were loaded; no file was written.
    NoData,
    /// Rows were loaded but none matched; no file was written.
    NoMatches,
    /// The report was written to `path`.
    ReportWritten { path: PathBuf, total_calls: usize },
}

// ── CallLogAnalyzer ───────────────────────────────────────────────────────────

/// Analyzes call-log exports for a single user.
pub struct CallLogAnalyzer {
    /// Identifier matched against the `To` and `From` columns.
    user: String,
    /// Glob patterns for the input CSV files.
    csv_files: Vec<String>,
    /// Destination spreadsheet.
    output_file: PathBuf,
    config: AnalyzerConfig,
}

impl CallLogAnalyzer {
    pub fn new(
        user: impl Into<String>,
        csv_files: Vec<String>,
        output_file: impl Into<PathBuf>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            user: user.into(),
            csv_files,
            output_file: output_file.into(),
            config,
        }
    }

    /// Load, filter and analyze the call logs, then write the report.
    ///
    /// Empty input and an empty match set are not errors; they return
    /// [`AnalysisOutcome::NoData`] and [`AnalysisOutcome::NoMatches`] without
    /// touching the output path.
    pub fn analyze(&self) -> Result<AnalysisOutcome> {
        info!("Starting call log analysis...");

        let records = load_call_records(self.csv_files.as_slice())?;
        if records.is_empty() {
            warn!("No data loaded from CSV files. Exiting.");
            return Ok(AnalysisOutcome::NoData);
        }

        let filtered =
            CallFilter::new(&self.user, self.config.active_call_seconds_threshold).apply(records);
        if filtered.is_empty() {
            info!("No calls matched the specified criteria.");
            return Ok(AnalysisOutcome::NoMatches);
        }

        let report = self.build_report(&filtered)?;
        write_report(&report, &self.output_file)?;

        info!(
            "Analysis complete. Results saved to {}",
            self.output_file.display()
        );

        Ok(AnalysisOutcome::ReportWritten {
            path: self.output_file.clone(),
            total_calls: filtered.len(),
        })
    }

    /// Build both sheets for an already-filtered call set.
    pub fn build_report(&self, filtered: &[CallRecord]) -> Result<CallReport> {
        let summary = summarize(filtered, &self.user);
        let detail = DetailFormatter::new(&self.user, &self.config).build(filtered)?;
        Ok(CallReport { summary, detail })
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
