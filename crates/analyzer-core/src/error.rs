use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the call log analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report file could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A CSV header lacks one of the columns the pipeline reads.
    #[error("Missing required column \"{column}\" in {path}")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A duration cell is neither empty nor a non-negative number.
    #[error("Invalid duration \"{value}\" in {path}")]
    InvalidDuration { path: PathBuf, value: String },

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A matched record lacks a field needed to build the report.
    #[error("Missing value for field: {0}")]
    MissingField(&'static str),

    /// A file glob pattern is not syntactically valid.
    #[error("Invalid glob pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A directory could not be read while expanding a glob pattern.
    #[error("Failed to expand glob: {0}")]
    Glob(#[from] glob::GlobError),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A JSON configuration document could not be parsed.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The spreadsheet workbook could not be assembled.
    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the analyzer crates.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
