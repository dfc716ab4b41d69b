//! Query service
//!
//! Answers month-scoped questions (which expenses, how much per category,
//! what was saved) by fetching raw records from the store, or the cache, and
//! aggregating them. Savings are always computed here, never taken from the
//! store.

use std::thread;

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{CalendarZone, Earning, Expense, Money, MonthYear};
use crate::storage::RecordStore;

use super::aggregate::{
    category_totals, expenses_in_month, savings_from, total_amount, CategoryTotals,
    MonthlySummary,
};
use super::cache::SummaryCache;

/// Service for month queries and aggregation
pub struct QueryService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    cache: &'a SummaryCache,
    zone: CalendarZone,
}

impl<'a, S: RecordStore + ?Sized> QueryService<'a, S> {
    /// Create a new query service
    ///
    /// `zone` decides which calendar month a stored timestamp belongs to.
    pub fn new(store: &'a S, cache: &'a SummaryCache, zone: CalendarZone) -> Self {
        Self { store, cache, zone }
    }

    /// Store result for a month, which may include neighbouring days
    fn month_candidates(&self, month: MonthYear) -> PennywiseResult<Vec<Expense>> {
        if let Some(cached) = self.cache.expenses(month) {
            return Ok(cached);
        }

        let fetched = self.store.get_expenses_by_month_year(month)?;
        self.cache.store_expenses(month, fetched.clone());
        Ok(fetched)
    }

    /// Expenses whose date falls in `month`, in no particular order
    pub fn expenses_for_month(&self, month: MonthYear) -> PennywiseResult<Vec<Expense>> {
        let candidates = self.month_candidates(month)?;
        Ok(expenses_in_month(&candidates, month, self.zone))
    }

    /// The earnings set for `month`, or `None` if never set
    pub fn earnings_for_month(&self, month: MonthYear) -> PennywiseResult<Option<Earning>> {
        if let Some(cached) = self.cache.earnings(month) {
            return Ok(cached);
        }

        let fetched = self.store.get_monthly_earnings(month)?;
        self.cache.store_earnings(month, fetched.clone());
        Ok(fetched)
    }

    /// Sum of a month's expenses
    pub fn total_for_month(&self, month: MonthYear) -> PennywiseResult<Money> {
        total_amount(&self.expenses_for_month(month)?)
    }

    /// Per-category totals for a month, in first-seen order
    pub fn category_totals_for_month(&self, month: MonthYear) -> PennywiseResult<CategoryTotals> {
        category_totals(&self.expenses_for_month(month)?)
    }

    /// Total spent in one category during a month
    ///
    /// The category is matched exactly, case included.
    pub fn category_total(&self, category: &str, month: MonthYear) -> PennywiseResult<Money> {
        let expenses = self.expenses_for_month(month)?;
        let amounts = expenses
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount);
        Money::checked_sum(amounts).ok_or_else(|| PennywiseError::amount_overflow("category total"))
    }

    /// Earnings (zero when unset) minus the month's expenses
    pub fn savings(&self, month: MonthYear) -> PennywiseResult<Money> {
        let earnings = self.earnings_for_month(month)?.map(|e| e.amount);
        let total = self.total_for_month(month)?;
        savings_from(earnings, total)
    }

    /// Earnings, totals, savings and category breakdown for a month
    ///
    /// The earnings and expenses reads run concurrently.
    pub fn monthly_summary(&self, month: MonthYear) -> PennywiseResult<MonthlySummary> {
        let (earnings, expenses) = thread::scope(|scope| {
            let earnings = scope.spawn(|| self.earnings_for_month(month));
            let expenses = self.expenses_for_month(month);
            (earnings.join(), expenses)
        });

        let earnings = earnings.map_err(|_| {
            PennywiseError::StoreUnavailable("earnings lookup panicked".to_string())
        })??;
        let expenses = expenses?;

        MonthlySummary::from_parts(month, earnings.map(|e| e.amount), &expenses)
    }

    /// Every expense, newest date first
    pub fn all_expenses(&self) -> PennywiseResult<Vec<Expense>> {
        let mut expenses = self.store.get_all_expenses()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }
}
