//! Reports module for Pennywise
//!
//! Month-level reports that can be rendered for the terminal or exported.

pub mod summary;

pub use summary::MonthlySummaryReport;
