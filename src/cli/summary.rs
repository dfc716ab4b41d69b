//! Summary and export CLI commands

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::settings::Settings;
use crate::error::{PennywiseError, PennywiseResult};
use crate::export::export_expenses_csv;
use crate::reports::MonthlySummaryReport;
use crate::services::{QueryService, SummaryCache};
use crate::storage::Storage;

use super::parse_month;

fn create_output(path: &Path) -> PennywiseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PennywiseError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Show the monthly summary, or write it as CSV when `output` is given
pub fn handle_summary_command(
    storage: &Storage,
    cache: &SummaryCache,
    settings: &Settings,
    month: Option<String>,
    output: Option<&Path>,
) -> PennywiseResult<()> {
    let query_service = QueryService::new(storage, cache, settings.calendar_zone);
    let month = parse_month(month.as_deref(), settings)?;

    let report =
        MonthlySummaryReport::generate(&query_service, month, settings.currency_symbol.clone())?;

    match output {
        Some(path) => {
            let mut writer = create_output(path)?;
            report.export_csv(&mut writer)?;
            writer
                .flush()
                .map_err(|e| PennywiseError::Export(e.to_string()))?;
            println!(
                "Summary for {} written to {}",
                month.friendly(),
                path.display()
            );
        }
        None => print!("{}", report.format_terminal()),
    }

    Ok(())
}

/// Export a month's expenses, or every expense, to a CSV file
pub fn handle_export_command(
    storage: &Storage,
    cache: &SummaryCache,
    settings: &Settings,
    path: &Path,
    month: Option<String>,
) -> PennywiseResult<()> {
    let query_service = QueryService::new(storage, cache, settings.calendar_zone);

    let (expenses, scope) = match month {
        Some(m) => {
            let month = parse_month(Some(&m), settings)?;
            (query_service.expenses_for_month(month)?, month.friendly())
        }
        None => (query_service.all_expenses()?, "all months".to_string()),
    };

    let mut writer = create_output(path)?;
    let count = export_expenses_csv(&expenses, settings.calendar_zone, &mut writer)?;
    writer
        .flush()
        .map_err(|e| PennywiseError::Export(e.to_string()))?;

    println!(
        "Exported {} expense(s) for {} to {}",
        count,
        scope,
        path.display()
    );
    Ok(())
}
