//! Audit entries
//!
//! Each entry carries the typed records a change touched, so the log can be
//! rendered (or replayed) without guessing at field names.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Earning, Expense};

/// A change to the stored data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    ExpenseAdded { expense: Expense },
    ExpenseUpdated { before: Expense, after: Expense },
    ExpenseDeleted { expense: Expense },
    /// `previous` is `None` the first time a month's earnings are set
    EarningsSet {
        previous: Option<Earning>,
        current: Earning,
    },
}

impl AuditEvent {
    /// Display ID of the record the event is about, e.g. "exp-7"
    pub fn record_id(&self) -> String {
        match self {
            Self::ExpenseAdded { expense } | Self::ExpenseDeleted { expense } => {
                expense.id.to_string()
            }
            Self::ExpenseUpdated { after, .. } => after.id.to_string(),
            Self::EarningsSet { current, .. } => current.id.to_string(),
        }
    }

    /// One-line description of what happened
    pub fn describe(&self) -> String {
        match self {
            Self::ExpenseAdded { expense } => format!("added {}", expense_line(expense)),
            Self::ExpenseDeleted { expense } => format!("deleted {}", expense_line(expense)),
            Self::ExpenseUpdated { before, after } => {
                format!("updated {}", expense_changes(before, after))
            }
            Self::EarningsSet { previous, current } => match previous {
                Some(previous) if previous.amount != current.amount => format!(
                    "earnings for {} changed {} -> {}",
                    current.month.friendly(),
                    previous.amount,
                    current.amount
                ),
                _ => format!(
                    "earnings for {} set to {}",
                    current.month.friendly(),
                    current.amount
                ),
            },
        }
    }
}

/// Amount, category (quoted so padding shows) and date of an expense
fn expense_line(expense: &Expense) -> String {
    format!(
        "{} in {:?} on {}: {}",
        expense.amount,
        expense.category,
        expense.date.format("%Y-%m-%d"),
        expense.description
    )
}

fn expense_changes(before: &Expense, after: &Expense) -> String {
    let mut changes = Vec::new();
    if before.amount != after.amount {
        changes.push(format!("amount {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category {:?} -> {:?}", before.category, after.category));
    }
    if before.date != after.date {
        changes.push(format!(
            "date {} -> {}",
            before.date.format("%Y-%m-%d"),
            after.date.format("%Y-%m-%d")
        ));
    }
    if before.description != after.description {
        changes.push("description".to_string());
    }

    if changes.is_empty() {
        "with no changes".to_string()
    } else {
        changes.join("; ")
    }
}

/// An event and when it was recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
}

impl AuditEntry {
    /// Stamp an event with the current time
    pub fn now(event: AuditEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<6} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.event.record_id(),
            self.event.describe()
        )
    }
}
