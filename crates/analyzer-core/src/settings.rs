use chrono_tz::Tz;
use clap::Parser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AnalyzerError, Result};
use crate::time_utils::resolve_timezone;

/// Minimum number of seconds a call must last to count as active.
pub const DEFAULT_ACTIVE_CALL_SECONDS_THRESHOLD: u64 = 10;

/// Zone the detail sheet renders call times in.
pub const DEFAULT_TARGET_TIMEZONE: &str = "US/Central";

/// Shape of an identifier assigned by the phone exchange.
pub const DEFAULT_PBX_ID_PATTERN: &str = r"^[a-f0-9]{32}$";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Analyze Signalwire call logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "call-log-analyzer",
    about = "Analyze Signalwire call logs",
    version
)]
pub struct Settings {
    /// User identifier to filter logs by.
    pub user: String,

    /// One or more CSV file paths to analyze (glob patterns supported).
    #[arg(required = true, num_args = 1..)]
    pub csv_files: Vec<String>,

    /// Path to the output Excel file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Minimum call duration in seconds (overrides the config file)
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Timezone for the detail sheet, or "auto" (overrides the config file)
    #[arg(long)]
    pub timezone: Option<String>,

    /// JSON config file (defaults to ~/.call-log-analyzer/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// `tracing` level name selected by `--debug`.
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the [`AnalyzerConfig`] for this run.
    ///
    /// Reads `--config` when given, else the default config file if present,
    /// then applies CLI overrides.
    pub fn load_config(&self) -> Result<AnalyzerConfig> {
        self.load_config_impl(&ConfigFile::config_path())
    }

    /// Same as [`Settings::load_config`] with an explicit default config path
    /// so tests can redirect it to a temporary directory.
    pub fn load_config_impl(&self, default_path: &Path) -> Result<AnalyzerConfig> {
        let file = match &self.config {
            Some(path) => ConfigFile::load_from(path)?,
            None if default_path.exists() => ConfigFile::load_from(default_path)?,
            None => ConfigFile::default(),
        };
        AnalyzerConfig::resolve(&file, self.threshold, self.timezone.as_deref())
    }
}

// ── ConfigFile ─────────────────────────────────────────────────────────────────

/// Optional settings read from `~/.call-log-analyzer/config.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_call_seconds_threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pbx_id_pattern: Option<String>,
}

impl ConfigFile {
    /// Return the default path to the config file.
    /// Uses `~/.call-log-analyzer/config.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".call-log-analyzer").join("config.json")
    }

    /// Load the config file at `path`. Unreadable or malformed files are
    /// errors; the caller decides whether a missing file is acceptable.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(file)
    }
}

// ── AnalyzerConfig ─────────────────────────────────────────────────────────────

/// Resolved configuration passed into the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Inclusive minimum duration, in seconds, of a counted call.
    pub active_call_seconds_threshold: u64,
    /// Zone the detail sheet renders call times in.
    pub target_timezone: Tz,
    /// Name of `target_timezone` as shown in the detail header.
    pub timezone_name: String,
    /// Identifiers matching this pattern are shown as `PBX`.
    pub pbx_id_pattern: Regex,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            active_call_seconds_threshold: DEFAULT_ACTIVE_CALL_SECONDS_THRESHOLD,
            target_timezone: Tz::US__Central,
            timezone_name: DEFAULT_TARGET_TIMEZONE.to_string(),
            pbx_id_pattern: Regex::new(DEFAULT_PBX_ID_PATTERN)
                .expect("default PBX pattern is a valid regex"),
        }
    }
}

impl AnalyzerConfig {
    /// Build a config from raw values, validating the zone and pattern.
    pub fn new(threshold: u64, timezone: &str, pbx_id_pattern: &str) -> Result<Self> {
        let (target_timezone, timezone_name) = resolve_timezone(timezone)?;
        let pbx_id_pattern = Regex::new(pbx_id_pattern).map_err(|e| {
            AnalyzerError::Config(format!("invalid PBX pattern \"{}\": {}", pbx_id_pattern, e))
        })?;
        Ok(Self {
            active_call_seconds_threshold: threshold,
            target_timezone,
            timezone_name,
            pbx_id_pattern,
        })
    }

    /// Merge CLI overrides, the config file and built-in defaults, in that
    /// order of precedence.
    pub fn resolve(
        file: &ConfigFile,
        threshold: Option<u64>,
        timezone: Option<&str>,
    ) -> Result<Self> {
        let threshold = threshold
            .or(file.active_call_seconds_threshold)
            .unwrap_or(DEFAULT_ACTIVE_CALL_SECONDS_THRESHOLD);
        let timezone = timezone
            .or(file.target_timezone.as_deref())
            .unwrap_or(DEFAULT_TARGET_TIMEZONE);
        let pattern = file
            .pbx_id_pattern
            .as_deref()
            .unwrap_or(DEFAULT_PBX_ID_PATTERN);

        let config = Self::new(threshold, timezone, pattern)?;
        debug!(
            "Config: threshold={}s timezone={} pbx_pattern={}",
            config.active_call_seconds_threshold,
            config.timezone_name,
            config.pbx_id_pattern.as_str()
        );
        Ok(config)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_config(tmp: &TempDir, json: &str) -> PathBuf {
        let path = ConfigFile::config_path_in(tmp.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, json).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Settings {
        let mut full = vec!["call-log-analyzer"];
        full.extend_from_slice(args);
        Settings::parse_from(full)
    }

    // ── Settings CLI parsing ──────────────────────────────────────────────────

    #[test]
    fn test_settings_positional_and_output() {
        let settings = parse(&["bob", "a.csv", "logs/*.csv", "-o", "out.xlsx"]);
        assert_eq!(settings.user, "bob");
        assert_eq!(settings.csv_files, vec!["a.csv", "logs/*.csv"]);
        assert_eq!(settings.output, PathBuf::from("out.xlsx"));
        assert!(!settings.debug);
        assert!(settings.threshold.is_none());
        assert!(settings.timezone.is_none());
        assert!(settings.config.is_none());
    }

    #[test]
    fn test_settings_long_output_and_debug() {
        let settings = parse(&["bob", "a.csv", "--output", "r.xlsx", "--debug"]);
        assert_eq!(settings.output, PathBuf::from("r.xlsx"));
        assert!(settings.debug);
        assert_eq!(settings.log_level(), "debug");
    }

    #[test]
    fn test_settings_output_is_required() {
        let result = Settings::try_parse_from(["call-log-analyzer", "bob", "a.csv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_csv_files_required() {
        let result = Settings::try_parse_from(["call-log-analyzer", "bob", "-o", "r.xlsx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_overrides() {
        let settings = parse(&[
            "bob",
            "a.csv",
            "-o",
            "r.xlsx",
            "--threshold",
            "30",
            "--timezone",
            "Europe/Berlin",
        ]);
        assert_eq!(settings.threshold, Some(30));
        assert_eq!(settings.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(settings.log_level(), "info");
    }

    // ── AnalyzerConfig ────────────────────────────────────────────────────────

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.active_call_seconds_threshold, 10);
        assert_eq!(config.target_timezone, Tz::US__Central);
        assert_eq!(config.timezone_name, "US/Central");
        assert!(config
            .pbx_id_pattern
            .is_match("0123456789abcdef0123456789abcdef"));
    }

    #[test]
    fn test_resolve_defaults_from_empty_file() {
        let config = AnalyzerConfig::resolve(&ConfigFile::default(), None, None).unwrap();
        assert_eq!(config.active_call_seconds_threshold, 10);
        assert_eq!(config.timezone_name, "US/Central");
        assert_eq!(config.pbx_id_pattern.as_str(), DEFAULT_PBX_ID_PATTERN);
    }

    #[test]
    fn test_resolve_file_values_used() {
        let file = ConfigFile {
            active_call_seconds_threshold: Some(45),
            target_timezone: Some("UTC".to_string()),
            pbx_id_pattern: Some("^pbx-".to_string()),
        };
        let config = AnalyzerConfig::resolve(&file, None, None).unwrap();
        assert_eq!(config.active_call_seconds_threshold, 45);
        assert_eq!(config.target_timezone, Tz::UTC);
        assert!(config.pbx_id_pattern.is_match("pbx-7"));
    }

    #[test]
    fn test_resolve_cli_wins_over_file() {
        let file = ConfigFile {
            active_call_seconds_threshold: Some(45),
            target_timezone: Some("UTC".to_string()),
            pbx_id_pattern: None,
        };
        let config = AnalyzerConfig::resolve(&file, Some(5), Some("Asia/Tokyo")).unwrap();
        assert_eq!(config.active_call_seconds_threshold, 5);
        assert_eq!(config.timezone_name, "Asia/Tokyo");
    }

    #[test]
    fn test_resolve_invalid_timezone_is_error() {
        let err = AnalyzerConfig::resolve(&ConfigFile::default(), None, Some("Nowhere/City"))
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Config(_)));
    }

    #[test]
    fn test_resolve_invalid_pattern_is_error() {
        let file = ConfigFile {
            pbx_id_pattern: Some("([a-f".to_string()),
            ..Default::default()
        };
        let err = AnalyzerConfig::resolve(&file, None, None).unwrap_err();
        assert!(err.to_string().contains("invalid PBX pattern"));
    }

    // ── ConfigFile loading ────────────────────────────────────────────────────

    #[test]
    fn test_config_file_load_partial() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_config(&tmp, r#"{"active_call_seconds_threshold": 20}"#);
        let file = ConfigFile::load_from(&path).unwrap();
        assert_eq!(file.active_call_seconds_threshold, Some(20));
        assert!(file.target_timezone.is_none());
        assert!(file.pbx_id_pattern.is_none());
    }

    #[test]
    fn test_config_file_load_malformed_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_config(&tmp, "{not json");
        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, AnalyzerError::ConfigParse(_)));
    }

    #[test]
    fn test_config_file_load_missing_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = ConfigFile::load_from(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AnalyzerError::FileRead { .. }));
    }

    // ── Settings::load_config_impl ────────────────────────────────────────────

    #[test]
    fn test_load_config_without_any_file_uses_defaults() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = parse(&["bob", "a.csv", "-o", "r.xlsx"]);
        let config = settings
            .load_config_impl(&ConfigFile::config_path_in(tmp.path()))
            .unwrap();
        assert_eq!(config.active_call_seconds_threshold, 10);
        assert_eq!(config.timezone_name, "US/Central");
    }

    #[test]
    fn test_load_config_reads_default_path() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_config(&tmp, r#"{"target_timezone": "Europe/London"}"#);
        let settings = parse(&["bob", "a.csv", "-o", "r.xlsx"]);
        let config = settings.load_config_impl(&path).unwrap();
        assert_eq!(config.timezone_name, "Europe/London");
    }

    #[test]
    fn test_load_config_explicit_path_and_cli_override() {
        let tmp = TempDir::new().expect("tempdir");
        let explicit = tmp.path().join("custom.json");
        std::fs::write(
            &explicit,
            r#"{"active_call_seconds_threshold": 60, "target_timezone": "UTC"}"#,
        )
        .unwrap();
        let settings = parse(&[
            "bob",
            "a.csv",
            "-o",
            "r.xlsx",
            "--config",
            explicit.to_str().unwrap(),
            "--threshold",
            "15",
        ]);
        let config = settings
            .load_config_impl(&ConfigFile::config_path_in(tmp.path()))
            .unwrap();
        assert_eq!(config.active_call_seconds_threshold, 15);
        assert_eq!(config.timezone_name, "UTC");
    }

    #[test]
    fn test_load_config_explicit_missing_path_is_error() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("missing.json");
        let settings = parse(&[
            "bob",
            "a.csv",
            "-o",
            "r.xlsx",
            "--config",
            missing.to_str().unwrap(),
        ]);
        assert!(settings
            .load_config_impl(&ConfigFile::config_path_in(tmp.path()))
            .is_err());
    }
}
