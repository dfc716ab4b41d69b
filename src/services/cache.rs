//! Month data cache
//!
//! Holds the raw store results for each month that has been queried. Derived
//! values (totals, breakdowns, savings) are always recomputed from these
//! sets, so dropping a set is enough to refresh everything built on it.
//!
//! Invalidation rules:
//! - any expense mutation clears every cached expense set, since an update
//!   can move an expense between months;
//! - setting earnings for a month clears only that month's earnings entry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::models::{Earning, Expense, MonthYear};

/// Cache of per-month expenses and earnings
#[derive(Debug)]
pub struct SummaryCache {
    enabled: bool,
    expenses: RwLock<HashMap<MonthYear, Vec<Expense>>>,
    /// `Some(None)` in the map means "fetched, no earnings set"
    earnings: RwLock<HashMap<MonthYear, Option<Earning>>>,
}

impl Default for SummaryCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SummaryCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            expenses: RwLock::new(HashMap::new()),
            earnings: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Cached store result for a month's expenses
    pub fn expenses(&self, month: MonthYear) -> Option<Vec<Expense>> {
        if !self.enabled {
            return None;
        }
        let map = self.expenses.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&month).cloned()
    }

    pub fn store_expenses(&self, month: MonthYear, expenses: Vec<Expense>) {
        if !self.enabled {
            return;
        }
        let mut map = self.expenses.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(month, expenses);
    }

    /// Cached earnings lookup; the outer `None` is a cache miss
    pub fn earnings(&self, month: MonthYear) -> Option<Option<Earning>> {
        if !self.enabled {
            return None;
        }
        let map = self.earnings.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&month).cloned()
    }

    pub fn store_earnings(&self, month: MonthYear, earning: Option<Earning>) {
        if !self.enabled {
            return;
        }
        let mut map = self.earnings.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(month, earning);
    }

    /// Drop every cached expense set
    pub fn invalidate_expenses(&self) {
        let mut map = self.expenses.write().unwrap_or_else(PoisonError::into_inner);
        map.clear();
    }

    /// Drop the cached earnings for one month
    pub fn invalidate_earnings(&self, month: MonthYear) {
        let mut map = self.earnings.write().unwrap_or_else(PoisonError::into_inner);
        map.remove(&month);
    }
}
