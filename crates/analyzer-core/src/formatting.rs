use regex::Regex;

/// Label substituted for identifiers assigned by the phone exchange.
pub const PBX_LABEL: &str = "PBX";

/// Format a duration in whole seconds as a human-readable string.
///
/// Components are emitted in `h`, `m`, `s` order and zero components are
/// dropped. Seconds are kept when they are the only component, so zero
/// renders as `"0s"`.
///
/// # Examples
///
/// ```
/// use analyzer_core::formatting::format_duration;
///
/// assert_eq!(format_duration(0),    "0s");
/// assert_eq!(format_duration(45),   "45s");
/// assert_eq!(format_duration(65),   "1m 5s");
/// assert_eq!(format_duration(7200), "2h");
/// assert_eq!(format_duration(3930), "1h 5m 30s");
/// ```
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut parts: Vec<String> = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

/// [`format_duration`] for a possibly-empty duration cell; empty is `"0s"`.
pub fn format_optional_duration(total_seconds: Option<u64>) -> String {
    format_duration(total_seconds.unwrap_or(0))
}

/// Map a call endpoint to the name shown in the detail sheet.
///
/// Identifiers matching `pbx_pattern` become [`PBX_LABEL`]; anything else is
/// returned unchanged.
pub fn display_name(identifier: &str, pbx_pattern: &Regex) -> String {
    if pbx_pattern.is_match(identifier) {
        PBX_LABEL.to_string()
    } else {
        identifier.to_string()
    }
}

/// Integer mean of `total` over `count`, truncated; `0` when `count` is zero.
pub fn truncated_mean(total: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    total / count
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pbx_pattern() -> Regex {
        Regex::new(r"^[a-f0-9]{32}$").unwrap()
    }

    /// Reparse `"1h 5m 30s"` back into seconds.
    fn reparse(s: &str) -> u64 {
        s.split(' ')
            .map(|part| {
                let (num, unit) = part.split_at(part.len() - 1);
                let n: u64 = num.parse().unwrap();
                match unit {
                    "h" => n * 3600,
                    "m" => n * 60,
                    "s" => n,
                    other => panic!("unexpected unit {other}"),
                }
            })
            .sum()
    }

    // ── format_duration ──────────────────────────────────────────────────────

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0), "0s");
    }

    #[test]
    fn test_format_duration_seconds_only() {
        assert_eq!(format_duration(1), "1s");
        assert_eq!(format_duration(59), "59s");
    }

    #[test]
    fn test_format_duration_drops_zero_components() {
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(3605), "1h 5s");
        assert_eq!(format_duration(7200), "2h");
    }

    #[test]
    fn test_format_duration_all_components() {
        assert_eq!(format_duration(3930), "1h 5m 30s");
        assert_eq!(format_duration(65), "1m 5s");
    }

    #[test]
    fn test_format_duration_large_hours() {
        assert_eq!(format_duration(100 * 3600 + 1), "100h 1s");
    }

    #[test]
    fn test_format_duration_reparses_exactly() {
        for s in (0..10_000).step_by(7).chain([86_399, 86_400, 90_061]) {
            let formatted = format_duration(s);
            assert_eq!(reparse(&formatted), s, "format_duration({s}) = {formatted}");
            assert_eq!(formatted == "0s", s == 0);
        }
    }

    #[test]
    fn test_format_optional_duration_none_is_zero() {
        assert_eq!(format_optional_duration(None), "0s");
        assert_eq!(format_optional_duration(Some(61)), "1m 1s");
    }

    // ── display_name ─────────────────────────────────────────────────────────

    #[test]
    fn test_display_name_pbx_identifier() {
        assert_eq!(
            display_name("0123456789abcdef0123456789abcdef", &pbx_pattern()),
            "PBX"
        );
    }

    #[test]
    fn test_display_name_plain_identifier_unchanged() {
        assert_eq!(
            display_name("alice@example.com", &pbx_pattern()),
            "alice@example.com"
        );
        assert_eq!(display_name("+15551234567", &pbx_pattern()), "+15551234567");
    }

    #[test]
    fn test_display_name_requires_exact_hex_shape() {
        let pattern = pbx_pattern();
        // Uppercase hex, 31 and 33 characters are all ordinary identifiers.
        assert_eq!(
            display_name("0123456789ABCDEF0123456789ABCDEF", &pattern),
            "0123456789ABCDEF0123456789ABCDEF"
        );
        assert_eq!(
            display_name("0123456789abcdef0123456789abcde", &pattern),
            "0123456789abcdef0123456789abcde"
        );
        assert_eq!(
            display_name("0123456789abcdef0123456789abcdef0", &pattern),
            "0123456789abcdef0123456789abcdef0"
        );
    }

    // ── truncated_mean ───────────────────────────────────────────────────────

    #[test]
    fn test_truncated_mean_truncates() {
        assert_eq!(truncated_mean(10, 3), 3);
        assert_eq!(truncated_mean(119, 2), 59);
    }

    #[test]
    fn test_truncated_mean_empty_is_zero() {
        assert_eq!(truncated_mean(0, 0), 0);
    }
}
