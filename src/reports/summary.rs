//! Monthly Summary Report
//!
//! Earnings, spending, savings and the category breakdown for one month.

use std::io::Write;

use serde::Serialize;

use crate::display::report::{double_separator, format_bar, format_percentage, separator};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Money, MonthYear};
use crate::services::{MonthlySummary, QueryService};
use crate::storage::RecordStore;

const WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// Monthly Summary Report
#[derive(Debug, Clone)]
pub struct MonthlySummaryReport {
    pub summary: MonthlySummary,
    /// Currency symbol used when rendering amounts
    pub currency_symbol: String,
}

/// One CSV row of the report
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    month: String,
    line: &'a str,
    category: &'a str,
    amount: i64,
    percent: Option<String>,
}

impl MonthlySummaryReport {
    /// Generate the report for a month
    pub fn generate<S: RecordStore + ?Sized>(
        query: &QueryService<'_, S>,
        month: MonthYear,
        currency_symbol: impl Into<String>,
    ) -> PennywiseResult<Self> {
        Ok(Self {
            summary: query.monthly_summary(month)?,
            currency_symbol: currency_symbol.into(),
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let s = &self.summary;
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary: {}\n", s.month.friendly()));
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        let earnings = match s.earnings {
            Some(amount) => self.money(amount),
            None => "not set".to_string(),
        };
        output.push_str(&format!("{:<20} {:>14}\n", "Earnings:", earnings));
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "Total Expenses:",
            self.money(s.total_expenses)
        ));
        output.push_str(&format!("{:<20} {:>14}\n", "Savings:", self.money(s.savings)));
        output.push_str(&format!("{:<20} {:>14}\n", "Expenses:", s.expense_count));

        if let Some(rate) = s.savings_rate {
            if rate >= 0.0 {
                output.push_str(&format!("{} of earnings saved\n", format_percentage(rate)));
            } else {
                output.push_str(&format!("{} over budget\n", format_percentage(rate.abs())));
            }
        }

        output.push('\n');
        if s.breakdown.is_empty() {
            output.push_str("No expenses recorded for this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>12} {:>8}  {}\n",
            "Category", "Amount", "%", "Share"
        ));
        output.push_str(&separator(WIDTH));
        output.push('\n');

        for share in &s.breakdown {
            output.push_str(&format!(
                "{:<20} {:>12} {:>8}  {}\n",
                crate::display::truncate(&share.category, 20),
                self.money(share.amount),
                format_percentage(share.percent),
                format_bar(share.percent, 100.0, BAR_WIDTH)
            ));
        }

        output.push_str(&separator(WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12}\n",
            "TOTAL",
            self.money(s.total_expenses)
        ));

        output
    }

    /// Export the report to CSV format
    ///
    /// One row per category, followed by total, earnings and savings rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> PennywiseResult<()> {
        let s = &self.summary;
        let month = s.month.to_string();
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        let mut rows: Vec<SummaryRow> = s
            .breakdown
            .iter()
            .map(|share| SummaryRow {
                month: month.clone(),
                line: "category",
                category: &share.category,
                amount: share.amount.units(),
                percent: Some(format!("{:.2}", share.percent)),
            })
            .collect();

        rows.push(SummaryRow {
            month: month.clone(),
            line: "total",
            category: "",
            amount: s.total_expenses.units(),
            percent: None,
        });
        if let Some(earnings) = s.earnings {
            rows.push(SummaryRow {
                month: month.clone(),
                line: "earnings",
                category: "",
                amount: earnings.units(),
                percent: None,
            });
        }
        rows.push(SummaryRow {
            month,
            line: "savings",
            category: "",
            amount: s.savings.units(),
            percent: s.savings_rate.map(|r| format!("{:.2}", r)),
        });

        for row in &rows {
            csv_writer
                .serialize(row)
                .map_err(|e| PennywiseError::Export(e.to_string()))?;
        }
        csv_writer
            .flush()
            .map_err(|e| PennywiseError::Export(e.to_string()))?;

        Ok(())
    }
}
