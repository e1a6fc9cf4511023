//! Data layer for the call log analyzer.
//!
//! Responsible for discovering and reading call-log CSV exports, filtering
//! them down to one user's active inbound calls, and deriving the summary and
//! detail sheets of the report.

pub mod aggregator;
pub mod detail;
pub mod filter;
pub mod reader;

pub use analyzer_core as core;
