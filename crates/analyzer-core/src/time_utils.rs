use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{AnalyzerError, Result};

/// Zone name that asks for the running system's timezone.
pub const AUTO_TIMEZONE: &str = "auto";

/// Output format of local call times in the detail sheet.
pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve a configured zone name to a [`Tz`] and the name it resolved to.
///
/// `"auto"` resolves to the system timezone (UTC when the system zone is not
/// in the tz database). Any other unknown name is a configuration error.
pub fn resolve_timezone(tz_name: &str) -> Result<(Tz, String)> {
    if tz_name.eq_ignore_ascii_case(AUTO_TIMEZONE) {
        let system = get_system_timezone();
        return match system.parse::<Tz>() {
            Ok(tz) => {
                debug!("Resolved auto timezone to {}", system);
                Ok((tz, system))
            }
            Err(_) => {
                warn!(
                    "System timezone \"{}\" is not recognised, falling back to UTC",
                    system
                );
                Ok((Tz::UTC, "UTC".to_string()))
            }
        };
    }

    tz_name
        .parse::<Tz>()
        .map(|tz| (tz, tz_name.to_string()))
        .map_err(|_| AnalyzerError::Config(format!("unknown timezone \"{}\"", tz_name)))
}

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse an export timestamp into a UTC [`DateTime`].
///
/// Accepts RFC 3339 (`Z` suffix or any fixed offset, `T` or space between
/// date and time) and offset-less date-times, which are taken as UTC.
pub fn parse_utc_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return Err(AnalyzerError::TimestampParse(String::new()));
    }

    // Replace trailing 'Z' with '+00:00'.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Ok(dt.with_timezone(&Utc));
    }

    const OFFSET_FMTS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
    ];
    for fmt in OFFSET_FMTS {
        if let Ok(dt) = DateTime::parse_from_str(&normalised, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    const NAIVE_FMTS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE_FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(AnalyzerError::TimestampParse(s.to_string()))
}

// ── TimezoneHandler ───────────────────────────────────────────────────────────

/// Renders UTC instants as wall-clock time in the report's target zone.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneHandler {
    target_tz: Tz,
}

impl TimezoneHandler {
    pub fn new(target_tz: Tz) -> Self {
        Self { target_tz }
    }

    /// Convert `dt` to the target zone.
    pub fn convert(&self, dt: DateTime<Utc>) -> DateTime<Tz> {
        dt.with_timezone(&self.target_tz)
    }

    /// Convert `dt` to the target zone and format it as
    /// `YYYY-MM-DD HH:MM:SS` without an offset suffix.
    pub fn format_local(&self, dt: DateTime<Utc>) -> String {
        self.convert(dt).format(LOCAL_TIME_FORMAT).to_string()
    }

    /// Expose the configured target timezone.
    pub fn target_tz(&self) -> Tz {
        self.target_tz
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
