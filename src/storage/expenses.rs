//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, hands out
//! monotonically increasing IDs, and keeps a month index so month queries
//! don't scan every record.
//!
//! Every mutation writes the file while it still holds the write locks. If
//! the write fails the in-memory change is undone, so readers never see a
//! record that is not on disk.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PennywiseError;
use crate::models::{CalendarZone, Expense, ExpenseId, MonthYear, NewExpense};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl Default for ExpenseData {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            expenses: Vec::new(),
        }
    }
}

fn first_id() -> u64 {
    1
}

/// UTC month an expense is indexed under
fn index_month(expense: &Expense) -> MonthYear {
    MonthYear::from_date(CalendarZone::Utc.local_date(&expense.date))
}

fn lock_error(e: impl std::fmt::Display) -> PennywiseError {
    PennywiseError::StoreUnavailable(format!("Failed to acquire lock: {}", e))
}

/// Repository for expense persistence with a month index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<ExpenseId, Expense>>,
    /// Index: UTC month of `date` -> expense ids
    by_month: RwLock<HashMap<MonthYear, Vec<ExpenseId>>>,
    next_id: RwLock<ExpenseId>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            by_month: RwLock::new(HashMap::new()),
            next_id: RwLock::new(ExpenseId::new(first_id())),
        }
    }

    /// Load expenses from disk and build the month index
    pub fn load(&self) -> Result<(), PennywiseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        data.clear();
        by_month.clear();

        let mut next = ExpenseId::new(file_data.next_id.max(first_id()));
        for expense in file_data.expenses {
            if expense.id >= next {
                next = expense.id.next();
            }
            by_month
                .entry(index_month(&expense))
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }
        *next_id = next;

        Ok(())
    }

    fn write_file(
        &self,
        data: &BTreeMap<ExpenseId, Expense>,
        next_id: ExpenseId,
    ) -> Result<(), PennywiseError> {
        let file_data = ExpenseData {
            next_id: next_id.value(),
            expenses: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, newest date first
    pub fn get_all(&self) -> Result<Vec<Expense>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// Expenses indexed under `month` or either neighbouring month
    ///
    /// The index uses UTC months; including the neighbours makes the result a
    /// superset of the month in any calendar zone.
    pub fn get_by_month_year(&self, month: MonthYear) -> Result<Vec<Expense>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_month = self.by_month.read().map_err(lock_error)?;

        let expenses = [month.prev(), month, month.next()]
            .iter()
            .filter_map(|m| by_month.get(m))
            .flatten()
            .filter_map(|id| data.get(id).cloned())
            .collect();
        Ok(expenses)
    }

    /// Store a new expense under the next ID
    pub fn insert(&self, input: NewExpense) -> Result<Expense, PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        let expense = Expense::new(*next_id, input);
        data.insert(expense.id, expense.clone());
        if let Err(e) = self.write_file(&data, next_id.next()) {
            data.remove(&expense.id);
            return Err(e);
        }

        *next_id = next_id.next();
        by_month
            .entry(index_month(&expense))
            .or_default()
            .push(expense.id);

        Ok(expense)
    }

    /// Replace the fields of an existing expense
    ///
    /// Returns the expense before and after the change.
    pub fn update(
        &self,
        id: ExpenseId,
        input: NewExpense,
    ) -> Result<(Expense, Expense), PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;
        let next_id = self.next_id.read().map_err(lock_error)?;

        let expense = data
            .get_mut(&id)
            .ok_or_else(|| PennywiseError::expense_not_found(id.to_string()))?;
        let before = expense.clone();
        expense.apply(input);
        let after = expense.clone();

        if let Err(e) = self.write_file(&data, *next_id) {
            data.insert(id, before);
            return Err(e);
        }

        // Reindex if the date moved to another month
        let old_month = index_month(&before);
        let new_month = index_month(&after);
        if old_month != new_month {
            if let Some(ids) = by_month.get_mut(&old_month) {
                ids.retain(|&eid| eid != id);
            }
            by_month.entry(new_month).or_default().push(id);
        }

        Ok((before, after))
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;
        let next_id = self.next_id.read().map_err(lock_error)?;

        let Some(expense) = data.remove(&id) else {
            return Ok(None);
        };
        if let Err(e) = self.write_file(&data, *next_id) {
            data.insert(id, expense);
            return Err(e);
        }

        if let Some(ids) = by_month.get_mut(&index_month(&expense)) {
            ids.retain(|&eid| eid != id);
        }
        Ok(Some(expense))
    }
}
