//! Expense model
//!
//! A single spending record: how much, on what, and when it happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::Money;

/// Categories offered to users when recording an expense
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Shopping",
    "Housing",
    "Healthcare",
    "Other",
];

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    MissingCategory,
    MissingDescription,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Expense amount must be a positive number"),
            Self::AmountTooLarge => {
                write!(f, "Expense amount may not exceed {}", Money::MAX_AMOUNT)
            }
            Self::MissingCategory => write!(f, "Expense category is required"),
            Self::MissingDescription => write!(f, "Expense description is required"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// The user-supplied fields of an expense
///
/// Used both to create an expense and to replace every field of an existing
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: Money,
    pub category: String,
    pub description: String,
    /// When the spending happened
    pub date: DateTime<Utc>,
}

impl NewExpense {
    pub fn new(
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    /// Check the shape of the input
    ///
    /// Text that is blank once trimmed is rejected, but accepted text is
    /// stored exactly as given.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount);
        }
        if !self.amount.is_valid_amount() {
            return Err(ExpenseValidationError::AmountTooLarge);
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::MissingDescription);
        }
        Ok(())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Money,
    /// Grouping label; compared exactly, case included
    pub category: String,
    pub description: String,
    /// When the spending happened
    pub date: DateTime<Utc>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create an expense record from input and a store-assigned ID
    pub fn new(id: ExpenseId, input: NewExpense) -> Self {
        let now = Utc::now();
        Self {
            id,
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every user-supplied field, keeping ID and creation time
    pub fn apply(&mut self, input: NewExpense) {
        self.amount = input.amount;
        self.category = input.category;
        self.description = input.description;
        self.date = input.date;
        self.updated_at = Utc::now();
    }
}
