//! Shared fixtures for service tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::config::paths::PennywisePaths;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Earning, EarningId, Expense, ExpenseId, Money, MonthYear, NewExpense};
use crate::storage::{RecordStore, Storage};

pub fn temp_storage() -> (TempDir, Storage) {
    let temp_dir = TempDir::new().unwrap();
    let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
    let mut storage = Storage::new(paths).unwrap();
    storage.load_all().unwrap();
    (temp_dir, storage)
}

/// Midday UTC on the given day
pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn month(m: u32, y: i32) -> MonthYear {
    MonthYear::new(m, y).unwrap()
}

pub fn new_expense(amount: i64, category: &str, date: DateTime<Utc>) -> NewExpense {
    NewExpense::new(Money::from_units(amount), category, "test", date)
}

/// Wraps a store, counting reads and optionally failing every call
pub struct CountingStore<S> {
    inner: S,
    pub expense_fetches: AtomicUsize,
    pub earnings_fetches: AtomicUsize,
    failing: AtomicBool,
}

impl<S: RecordStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            expense_fetches: AtomicUsize::new(0),
            earnings_fetches: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn expense_fetch_count(&self) -> usize {
        self.expense_fetches.load(Ordering::SeqCst)
    }

    pub fn earnings_fetch_count(&self) -> usize {
        self.earnings_fetches.load(Ordering::SeqCst)
    }

    fn check(&self) -> PennywiseResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(PennywiseError::StoreUnavailable("backend offline".into()))
        } else {
            Ok(())
        }
    }
}

impl<S: RecordStore> RecordStore for CountingStore<S> {
    fn add_expense(&self, input: NewExpense) -> PennywiseResult<ExpenseId> {
        self.check()?;
        self.inner.add_expense(input)
    }

    fn update_expense(&self, id: ExpenseId, input: NewExpense) -> PennywiseResult<()> {
        self.check()?;
        self.inner.update_expense(id, input)
    }

    fn delete_expense(&self, id: ExpenseId) -> PennywiseResult<()> {
        self.check()?;
        self.inner.delete_expense(id)
    }

    fn get_expense(&self, id: ExpenseId) -> PennywiseResult<Option<Expense>> {
        self.check()?;
        self.inner.get_expense(id)
    }

    fn get_all_expenses(&self) -> PennywiseResult<Vec<Expense>> {
        self.check()?;
        self.inner.get_all_expenses()
    }

    fn get_expenses_by_month_year(&self, month: MonthYear) -> PennywiseResult<Vec<Expense>> {
        self.expense_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.get_expenses_by_month_year(month)
    }

    fn get_monthly_earnings(&self, month: MonthYear) -> PennywiseResult<Option<Earning>> {
        self.earnings_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.get_monthly_earnings(month)
    }

    fn set_monthly_earnings(&self, amount: Money, month: MonthYear) -> PennywiseResult<EarningId> {
        self.check()?;
        self.inner.set_monthly_earnings(amount, month)
    }
}
