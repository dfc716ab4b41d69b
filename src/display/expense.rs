//! Expense display formatting
//!
//! Register views and detail blocks for expenses. Dates are shown in the
//! configured calendar zone so they match the month filtering.

use crate::config::settings::Settings;
use crate::models::{Earning, Expense, MonthYear};

use super::report::truncate;

/// Format a single expense as a register row
pub fn format_expense_row(expense: &Expense, settings: &Settings) -> String {
    let date = settings.calendar_zone.local_date(&expense.date);
    format!(
        "{:>8} {:10} {:14} {:28} {:>10}",
        expense.id.to_string(),
        date.format(&settings.date_format).to_string(),
        truncate(&expense.category, 14),
        truncate(&expense.description, 28),
        expense.amount.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format expenses as a register, newest date first
pub fn format_expense_register(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut sorted: Vec<&Expense> = expenses.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut output = String::new();
    output.push_str(&format!(
        "{:>8} {:10} {:14} {:28} {:>10}\n",
        "ID", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(74));
    output.push('\n');

    for expense in sorted {
        output.push_str(&format_expense_row(expense, settings));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();
    let date = settings.calendar_zone.local_date(&expense.date);

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", date.format(&settings.date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!(
        "Recorded:    {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Describe a month's earnings, keeping "not set" distinct from zero
pub fn format_earnings_line(month: MonthYear, earning: Option<&Earning>, settings: &Settings) -> String {
    match earning {
        Some(e) => format!(
            "Earnings for {}: {}",
            month.friendly(),
            e.amount.format_with_symbol(&settings.currency_symbol)
        ),
        None => format!("No earnings set for {}", month.friendly()),
    }
}
