//! CSV Export functionality
//!
//! Exports expenses to CSV format for spreadsheets.

use std::io::Write;

use serde::Serialize;

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{CalendarZone, Expense};

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    id: String,
    date: String,
    category: &'a str,
    description: &'a str,
    amount: i64,
}

/// Export expenses to CSV, oldest first
///
/// Dates are written as calendar dates in `zone`; amounts as whole units.
pub fn export_expenses_csv<W: Write>(
    expenses: &[Expense],
    zone: CalendarZone,
    writer: W,
) -> PennywiseResult<usize> {
    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for expense in &sorted {
        let row = ExpenseRow {
            id: expense.id.to_string(),
            date: zone.local_date(&expense.date).format("%Y-%m-%d").to_string(),
            category: &expense.category,
            description: &expense.description,
            amount: expense.amount.units(),
        };
        csv_writer
            .serialize(&row)
            .map_err(|e| PennywiseError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| PennywiseError::Export(e.to_string()))?;

    Ok(sorted.len())
}
