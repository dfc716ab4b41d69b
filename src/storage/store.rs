//! The record store boundary
//!
//! Everything above the storage layer talks to records through this trait,
//! so the query and mutation services work against any backend that can hold
//! expenses and monthly earnings.

use crate::error::PennywiseResult;
use crate::models::{Earning, EarningId, Expense, ExpenseId, Money, MonthYear, NewExpense};

/// Durable keyed storage for expenses and monthly earnings
///
/// Implementations report backend failures as
/// [`PennywiseError::StoreUnavailable`](crate::error::PennywiseError::StoreUnavailable)
/// and unknown IDs on update/delete as
/// [`PennywiseError::NotFound`](crate::error::PennywiseError::NotFound).
pub trait RecordStore: Send + Sync {
    /// Store a new expense and return its assigned ID
    fn add_expense(&self, input: NewExpense) -> PennywiseResult<ExpenseId>;

    /// Replace every field of an existing expense
    fn update_expense(&self, id: ExpenseId, input: NewExpense) -> PennywiseResult<()>;

    /// Permanently remove an expense
    fn delete_expense(&self, id: ExpenseId) -> PennywiseResult<()>;

    /// Look up a single expense
    fn get_expense(&self, id: ExpenseId) -> PennywiseResult<Option<Expense>>;

    fn get_all_expenses(&self) -> PennywiseResult<Vec<Expense>>;

    /// Expenses that may fall in `month`
    ///
    /// The result may be a superset; callers filter exactly.
    fn get_expenses_by_month_year(&self, month: MonthYear) -> PennywiseResult<Vec<Expense>>;

    /// The current earnings record for a month, if one was ever set
    fn get_monthly_earnings(&self, month: MonthYear) -> PennywiseResult<Option<Earning>>;

    /// Create or overwrite the earnings record for a month
    fn set_monthly_earnings(&self, amount: Money, month: MonthYear) -> PennywiseResult<EarningId>;
}
