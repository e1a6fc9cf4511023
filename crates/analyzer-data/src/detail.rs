//! Builds the chronological detail sheet from the filtered call set.

use analyzer_core::error::{AnalyzerError, Result};
use analyzer_core::formatting::{display_name, format_optional_duration};
use analyzer_core::models::{CallRecord, DetailRow, DetailSheet};
use analyzer_core::settings::AnalyzerConfig;
use analyzer_core::time_utils::{parse_utc_timestamp, TimezoneHandler};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::reader::COL_CREATED_AT;

/// Turns filtered records into [`DetailRow`]s for one user.
pub struct DetailFormatter<'a> {
    user: &'a str,
    config: &'a AnalyzerConfig,
    timezone: TimezoneHandler,
}

impl<'a> DetailFormatter<'a> {
    pub fn new(user: &'a str, config: &'a AnalyzerConfig) -> Self {
        Self {
            user,
            config,
            timezone: TimezoneHandler::new(config.target_timezone),
        }
    }

    /// Build the detail sheet, oldest call first.
    ///
    /// Calls with equal timestamps keep their input order. A missing or
    /// unparseable `Created at` aborts the build.
    pub fn build(&self, records: &[CallRecord]) -> Result<DetailSheet> {
        let mut timed: Vec<(DateTime<Utc>, &CallRecord)> = Vec::with_capacity(records.len());
        for record in records {
            let raw = record
                .created_at
                .as_deref()
                .ok_or(AnalyzerError::MissingField(COL_CREATED_AT))?;
            timed.push((parse_utc_timestamp(raw)?, record));
        }

        // `sort_by_key` is stable.
        timed.sort_by_key(|(created_at, _)| *created_at);

        let rows: Vec<DetailRow> = timed
            .into_iter()
            .map(|(created_at, record)| DetailRow {
                call_time: self.timezone.format_local(created_at),
                interaction: self.interaction(record),
                duration_readable: format_optional_duration(record.duration_seconds),
                duration_seconds: record.duration_seconds.unwrap_or(0),
            })
            .collect();

        debug!(
            "Built {} detail rows in {}",
            rows.len(),
            self.config.timezone_name
        );

        Ok(DetailSheet {
            timezone_name: self.config.timezone_name.clone(),
            rows,
        })
    }

    /// Describe a call from the user's point of view.
    ///
    /// Only the caller of a call to the user gets the PBX substitution; the
    /// callee of a call from the user is shown verbatim.
    pub fn interaction(&self, record: &CallRecord) -> String {
        match (record.caller.as_deref(), record.callee.as_deref()) {
            (Some(caller), Some(callee)) if callee == self.user => format!(
                "call from {}",
                display_name(caller, &self.config.pbx_id_pattern)
            ),
            (_, callee) => format!("call to {}", callee.unwrap_or_default()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
