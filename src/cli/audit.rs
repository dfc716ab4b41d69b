//! Audit log CLI command

use crate::error::PennywiseResult;
use crate::storage::Storage;

/// Print the most recent audit entries, newest last
pub fn handle_audit_command(storage: &Storage, limit: usize) -> PennywiseResult<()> {
    let Some(log) = storage.audit() else {
        println!("Audit logging is disabled.");
        return Ok(());
    };

    let (entries, total) = log.recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }
    println!();
    println!("Showing {} of {} entries", entries.len(), total);

    Ok(())
}
