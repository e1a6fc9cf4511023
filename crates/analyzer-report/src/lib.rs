//! Report output layer for the call log analyzer.
//!
//! Lays the summary and detail sheets out as worksheet cells, sizes their
//! columns, and writes the finished workbook to disk.

pub mod workbook;

pub use analyzer_core as core;
pub use workbook::write_report;
