//! Storage layer for Pennywise
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. [`Storage`] is the file-backed [`RecordStore`]: a mutation
//! either reaches disk or leaves no trace, and each one that reaches disk is
//! then recorded in the audit log.

pub mod earnings;
pub mod expenses;
pub mod file_io;
pub mod store;

pub use earnings::EarningRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use store::RecordStore;

use std::sync::{Mutex, PoisonError};

use crate::audit::{AuditEvent, AuditLog};
use crate::config::paths::PennywisePaths;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Earning, EarningId, Expense, ExpenseId, Money, MonthYear, NewExpense};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PennywisePaths,
    pub expenses: ExpenseRepository,
    pub earnings: EarningRepository,
    audit: Option<AuditLog>,
    /// Last audit write that failed after its change was saved
    audit_failure: Mutex<Option<PennywiseError>>,
}

impl Storage {
    /// Create a new Storage instance with audit logging enabled
    pub fn new(paths: PennywisePaths) -> Result<Self, PennywiseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            earnings: EarningRepository::new(paths.earnings_file()),
            audit: Some(AuditLog::new(paths.audit_log())),
            audit_failure: Mutex::new(None),
            paths,
        })
    }

    /// Turn audit logging on or off
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit = enabled.then(|| AuditLog::new(self.paths.audit_log()));
        self
    }

    /// The audit log, when auditing is enabled
    pub fn audit(&self) -> Option<&AuditLog> {
        self.audit.as_ref()
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PennywiseError> {
        self.expenses.load()?;
        self.earnings.load()?;
        Ok(())
    }

    /// Take the most recent audit failure, if any
    ///
    /// The change that failed to be audited is saved; only the log is behind.
    pub fn take_audit_failure(&self) -> Option<PennywiseError> {
        self.audit_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn record(&self, event: AuditEvent) {
        let Some(log) = &self.audit else {
            return;
        };
        if let Err(e) = log.append(event) {
            *self
                .audit_failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(e);
        }
    }
}

impl RecordStore for Storage {
    fn add_expense(&self, input: NewExpense) -> PennywiseResult<ExpenseId> {
        let expense = self.expenses.insert(input)?;
        let id = expense.id;
        self.record(AuditEvent::ExpenseAdded { expense });
        Ok(id)
    }

    fn update_expense(&self, id: ExpenseId, input: NewExpense) -> PennywiseResult<()> {
        let (before, after) = self.expenses.update(id, input)?;
        self.record(AuditEvent::ExpenseUpdated { before, after });
        Ok(())
    }

    fn delete_expense(&self, id: ExpenseId) -> PennywiseResult<()> {
        let expense = self
            .expenses
            .delete(id)?
            .ok_or_else(|| PennywiseError::expense_not_found(id.to_string()))?;
        self.record(AuditEvent::ExpenseDeleted { expense });
        Ok(())
    }

    fn get_expense(&self, id: ExpenseId) -> PennywiseResult<Option<Expense>> {
        self.expenses.get(id)
    }

    fn get_all_expenses(&self) -> PennywiseResult<Vec<Expense>> {
        self.expenses.get_all()
    }

    fn get_expenses_by_month_year(&self, month: MonthYear) -> PennywiseResult<Vec<Expense>> {
        self.expenses.get_by_month_year(month)
    }

    fn get_monthly_earnings(&self, month: MonthYear) -> PennywiseResult<Option<Earning>> {
        self.earnings.get_for_month(month)
    }

    fn set_monthly_earnings(&self, amount: Money, month: MonthYear) -> PennywiseResult<EarningId> {
        let (previous, current) = self.earnings.set(month, amount)?;
        let id = current.id;
        self.record(AuditEvent::EarningsSet { previous, current });
        Ok(id)
    }
}
