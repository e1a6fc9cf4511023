//! Runtime orchestration layer for the call log analyzer.
//!
//! Coordinates the data and report layers into a single synchronous
//! analysis run with explicit early-exit outcomes.

pub mod orchestrator;

pub use analyzer_core as core;
pub use analyzer_data as data;
pub use analyzer_report as report;
pub use orchestrator::{AnalysisOutcome, CallLogAnalyzer};
