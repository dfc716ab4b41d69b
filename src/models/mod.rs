//! Core data models for Pennywise
//!
//! This module contains the data structures of the expense-tracking domain:
//! expenses, monthly earnings, money amounts and calendar months.

pub mod earning;
pub mod expense;
pub mod ids;
pub mod money;
pub mod month;

pub use earning::{Earning, EarningValidationError};
pub use expense::{Expense, ExpenseValidationError, NewExpense, SUGGESTED_CATEGORIES};
pub use ids::{EarningId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use month::{CalendarZone, MonthParseError, MonthYear};
