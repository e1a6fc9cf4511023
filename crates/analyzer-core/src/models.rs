use serde::Serialize;
use std::fmt;

/// Direction of a call as exported in the `Direction` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CallDirection {
    /// Directed toward the logging system's owner.
    Inbound,
    /// Originated by the logging system's owner.
    Outbound,
    /// Any other value found in the export, kept verbatim.
    Other(String),
}

impl From<&str> for CallDirection {
    fn from(value: &str) -> Self {
        match value {
            "Inbound" => Self::Inbound,
            "Outbound" => Self::Outbound,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inbound => f.write_str("Inbound"),
            Self::Outbound => f.write_str("Outbound"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// A single row of a call-log export.
///
/// Every field is optional because exports leave cells empty; a record with
/// an empty direction, endpoint or duration never passes the call filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    /// Value of the `Direction` column.
    pub direction: Option<CallDirection>,
    /// Value of the `From` column.
    pub caller: Option<String>,
    /// Value of the `To` column.
    pub callee: Option<String>,
    /// Value of the `Duration (in seconds)` column.
    pub duration_seconds: Option<u64>,
    /// Raw `Created at` text; parsed as a UTC instant when the detail sheet
    /// is built.
    pub created_at: Option<String>,
}

impl CallRecord {
    /// `true` when the direction column reads exactly `Inbound`.
    pub fn is_inbound(&self) -> bool {
        matches!(self.direction, Some(CallDirection::Inbound))
    }

    /// `true` when `user` is the callee.
    pub fn is_to(&self, user: &str) -> bool {
        self.callee.as_deref() == Some(user)
    }

    /// `true` when `user` is the caller.
    pub fn is_from(&self, user: &str) -> bool {
        self.caller.as_deref() == Some(user)
    }

    /// `true` when `user` is either endpoint.
    pub fn involves(&self, user: &str) -> bool {
        self.is_to(user) || self.is_from(user)
    }
}

/// A value in the summary sheet's `Value` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SummaryValue {
    /// An integer count, written as a number cell.
    Count(u64),
    /// A formatted duration such as `"1h 5m 30s"`.
    Duration(String),
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Duration(s) => f.write_str(s),
        }
    }
}

/// One `(metric, value)` line of the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub metric: &'static str,
    pub value: SummaryValue,
}

/// Column headers of the summary sheet.
pub const SUMMARY_HEADERS: [&str; 2] = ["Metric", "Value"];

/// One line of the chronological detail sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    /// Wall-clock time in the target timezone, `YYYY-MM-DD HH:MM:SS`.
    pub call_time: String,
    /// `"call from …"` or `"call to …"`.
    pub interaction: String,
    /// Duration rendered by [`crate::formatting::format_duration`].
    pub duration_readable: String,
    /// Raw duration in whole seconds.
    pub duration_seconds: u64,
}

/// The detail sheet: rows plus the timezone named in the first header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSheet {
    pub timezone_name: String,
    pub rows: Vec<DetailRow>,
}

impl DetailSheet {
    /// Column headers, in output order.
    pub fn headers(&self) -> [String; 4] {
        [
            format!("Call Time ({})", self.timezone_name),
            "Interaction".to_string(),
            "Duration (Readable)".to_string(),
            "Duration (Seconds)".to_string(),
        ]
    }
}

/// Both sheets of a finished analysis, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallReport {
    pub summary: Vec<SummaryRow>,
    pub detail: DetailSheet,
}
