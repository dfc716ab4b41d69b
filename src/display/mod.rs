//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, earnings and summary figures
//! for terminal display.

pub mod expense;
pub mod report;

pub use expense::{
    format_earnings_line, format_expense_details, format_expense_register, format_expense_row,
};
pub use report::{format_bar, format_money_colored, format_percentage, separator, truncate};
