//! Export module for Pennywise
//!
//! Writes expense data out in spreadsheet-compatible CSV.

pub mod csv;

pub use self::csv::export_expenses_csv;
