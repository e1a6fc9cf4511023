//! Shared types for the call log analyzer.
//!
//! Holds the record and report models, the error type, configuration and
//! CLI settings, and the duration/timezone formatting helpers used by every
//! pipeline stage.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{AnalyzerError, Result};
pub use settings::AnalyzerConfig;
