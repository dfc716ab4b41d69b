//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod earnings;
pub mod expense;
pub mod summary;

pub use audit::handle_audit_command;
pub use earnings::{handle_earnings_command, EarningsCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use summary::{handle_export_command, handle_summary_command};

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::settings::Settings;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{ExpenseId, Money, MonthYear};

/// Parse a `YYYY-MM` argument, defaulting to the current month in the
/// configured calendar
pub(crate) fn parse_month(arg: Option<&str>, settings: &Settings) -> PennywiseResult<MonthYear> {
    match arg {
        Some(s) => MonthYear::parse(s)
            .map_err(|e| PennywiseError::Validation(format!("Invalid month: {}", e))),
        None => Ok(MonthYear::from_date(
            settings.calendar_zone.local_date(&Utc::now()),
        )),
    }
}

pub(crate) fn parse_amount(arg: &str) -> PennywiseResult<Money> {
    Money::parse(arg).map_err(|e| PennywiseError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a `YYYY-MM-DD` argument into the stored timestamp, defaulting to today
pub(crate) fn parse_date(arg: Option<&str>, settings: &Settings) -> PennywiseResult<DateTime<Utc>> {
    let zone = settings.calendar_zone;
    let date = match arg {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            PennywiseError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", s))
        })?,
        None => zone.local_date(&Utc::now()),
    };
    Ok(zone.timestamp_for(date))
}

pub(crate) fn parse_expense_id(arg: &str) -> PennywiseResult<ExpenseId> {
    arg.parse()
        .map_err(|_| PennywiseError::Validation(format!("Invalid expense ID: {}", arg)))
}
