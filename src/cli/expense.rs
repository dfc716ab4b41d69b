//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and deleting
//! expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_register};
use crate::error::PennywiseResult;
use crate::models::NewExpense;
use crate::services::{ExpenseService, QueryService, SummaryCache};
use crate::storage::Storage;

use super::{parse_amount, parse_date, parse_expense_id, parse_month};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount in whole units (e.g., "50")
        amount: String,

        /// Category (e.g., "Food")
        category: String,

        /// What the money was spent on
        description: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses for a month, newest first
    #[command(alias = "ls")]
    List {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,

        /// List every expense instead of one month
        #[arg(short, long)]
        all: bool,
    },

    /// Show one expense
    Show {
        /// Expense ID (e.g., "exp-7" or "7")
        id: String,
    },

    /// Replace the fields of an expense
    Edit {
        /// Expense ID
        id: String,

        /// New amount
        amount: String,

        /// New category
        category: String,

        /// New description
        description: String,

        /// New date (YYYY-MM-DD, defaults to the current date of the expense)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Permanently delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },

    /// List the suggested categories
    Categories,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    cache: &SummaryCache,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> PennywiseResult<()> {
    let expense_service = ExpenseService::new(storage, cache);
    let query_service = QueryService::new(storage, cache, settings.calendar_zone);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let input = NewExpense::new(
                parse_amount(&amount)?,
                category,
                description,
                parse_date(date.as_deref(), settings)?,
            );

            let id = expense_service.add(input)?;
            let expense = expense_service.get(id)?;
            println!(
                "Recorded {}: {} for {} ({})",
                expense.id,
                expense.amount.format_with_symbol(&settings.currency_symbol),
                expense.category,
                expense.description
            );
        }

        ExpenseCommands::List { month, all } => {
            if all {
                let expenses = query_service.all_expenses()?;
                print!("{}", format_expense_register(&expenses, settings));
            } else {
                let month = parse_month(month.as_deref(), settings)?;
                let expenses = query_service.expenses_for_month(month)?;
                println!("Expenses for {}", month.friendly());
                print!("{}", format_expense_register(&expenses, settings));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = expense_service.get(parse_expense_id(&id)?)?;
            print!("{}", format_expense_details(&expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            let id = parse_expense_id(&id)?;
            let existing = expense_service.get(id)?;
            let date = match date {
                Some(d) => parse_date(Some(&d), settings)?,
                None => existing.date,
            };

            let input = NewExpense::new(parse_amount(&amount)?, category, description, date);
            expense_service.update(id, input)?;
            println!("Updated {}", id);
        }

        ExpenseCommands::Delete { id } => {
            let id = parse_expense_id(&id)?;
            expense_service.delete(id)?;
            println!("Deleted {}", id);
        }

        ExpenseCommands::Categories => {
            println!("Suggested categories:");
            for category in &settings.suggested_categories {
                println!("  {}", category);
            }
        }
    }

    Ok(())
}
