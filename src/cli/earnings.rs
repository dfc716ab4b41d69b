//! Earnings CLI commands
//!
//! Implements CLI commands for setting and showing monthly earnings.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_earnings_line, format_money_colored};
use crate::error::PennywiseResult;
use crate::services::{EarningService, QueryService, SummaryCache};
use crate::storage::Storage;

use super::{parse_amount, parse_month};

/// Earnings subcommands
#[derive(Subcommand)]
pub enum EarningsCommands {
    /// Set the earnings for a month, replacing any earlier amount
    Set {
        /// Amount in whole units (e.g., "3200")
        amount: String,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the earnings and savings for a month
    Show {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle an earnings command
pub fn handle_earnings_command(
    storage: &Storage,
    cache: &SummaryCache,
    settings: &Settings,
    cmd: EarningsCommands,
) -> PennywiseResult<()> {
    let earning_service = EarningService::new(storage, cache);
    let query_service = QueryService::new(storage, cache, settings.calendar_zone);

    match cmd {
        EarningsCommands::Set { amount, month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let amount = parse_amount(&amount)?;

            earning_service.set(amount, month)?;
            println!(
                "Set earnings for {} to {}",
                month.friendly(),
                amount.format_with_symbol(&settings.currency_symbol)
            );
        }

        EarningsCommands::Show { month } => {
            let month = parse_month(month.as_deref(), settings)?;
            let earning = query_service.earnings_for_month(month)?;
            let savings = query_service.savings(month)?;

            println!("{}", format_earnings_line(month, earning.as_ref(), settings));
            println!(
                "Savings: {}",
                format_money_colored(savings, &settings.currency_symbol)
            );
            if earning.is_none() {
                println!("Use 'pennywise earnings set <amount>' to set earnings.");
            }
        }
    }

    Ok(())
}
