//! Summary statistics over the filtered call set.

use analyzer_core::formatting::{format_duration, truncated_mean};
use analyzer_core::models::{CallRecord, SummaryRow, SummaryValue};

pub const METRIC_TOTAL_CALLS: &str = "Total Calls";
pub const METRIC_CALLS_TO_USER: &str = "Total Calls To User";
pub const METRIC_CALLS_FROM_USER: &str = "Total Calls From User";
pub const METRIC_TOTAL_TIME: &str = "Total Time Spent";
pub const METRIC_AVG_TO_USER: &str = "Avg Call Time (To User)";
pub const METRIC_AVG_FROM_USER: &str = "Avg Call Time (From User)";
pub const METRIC_AVG_ALL: &str = "Avg Call Time (All)";

// ── CallStats ─────────────────────────────────────────────────────────────────

/// Call count and total duration accumulated over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    pub count: u64,
    pub total_seconds: u64,
}

impl CallStats {
    /// Add a single record's duration to the running totals.
    pub fn add_record(&mut self, record: &CallRecord) {
        self.count += 1;
        self.total_seconds = self
            .total_seconds
            .saturating_add(record.duration_seconds.unwrap_or(0));
    }

    /// Mean duration truncated to whole seconds, `0` when empty.
    pub fn average_seconds(&self) -> u64 {
        truncated_mean(self.total_seconds, self.count)
    }
}

// ── CallSummary ───────────────────────────────────────────────────────────────

/// Totals for all calls and for the to-user / from-user subsets.
///
/// Each call lands in exactly one subset: to-user when the user is the
/// callee, else from-user. A call where the user is both endpoints counts as
/// to-user, matching the detail sheet's `"call from …"` wording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallSummary {
    pub all: CallStats,
    pub to_user: CallStats,
    pub from_user: CallStats,
}

impl CallSummary {
    /// Accumulate `records` for `user`.
    pub fn from_records(records: &[CallRecord], user: &str) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.all.add_record(record);
            if record.is_to(user) {
                summary.to_user.add_record(record);
            } else if record.is_from(user) {
                summary.from_user.add_record(record);
            }
        }
        summary
    }

    /// The seven summary-sheet rows, in output order.
    pub fn to_rows(&self) -> Vec<SummaryRow> {
        let duration = |secs: u64| SummaryValue::Duration(format_duration(secs));
        vec![
            SummaryRow {
                metric: METRIC_TOTAL_CALLS,
                value: SummaryValue::Count(self.all.count),
            },
            SummaryRow {
                metric: METRIC_CALLS_TO_USER,
                value: SummaryValue::Count(self.to_user.count),
            },
            SummaryRow {
                metric: METRIC_CALLS_FROM_USER,
                value: SummaryValue::Count(self.from_user.count),
            },
            SummaryRow {
                metric: METRIC_TOTAL_TIME,
                value: duration(self.all.total_seconds),
            },
            SummaryRow {
                metric: METRIC_AVG_TO_USER,
                value: duration(self.to_user.average_seconds()),
            },
            SummaryRow {
                metric: METRIC_AVG_FROM_USER,
                value: duration(self.from_user.average_seconds()),
            },
            SummaryRow {
                metric: METRIC_AVG_ALL,
                value: duration(self.all.average_seconds()),
            },
        ]
    }
}

/// Build the summary sheet rows for `records`.
pub fn summarize(records: &[CallRecord], user: &str) -> Vec<SummaryRow> {
    CallSummary::from_records(records, user).to_rows()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
