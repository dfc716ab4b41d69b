//! Expense service
//!
//! Validates expense input and passes it to the store unchanged, then drops
//! cached month data so later queries see the change.

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Expense, ExpenseId, NewExpense};
use crate::storage::RecordStore;

use super::cache::SummaryCache;

/// Service for expense mutations
pub struct ExpenseService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    cache: &'a SummaryCache,
}

impl<'a, S: RecordStore + ?Sized> ExpenseService<'a, S> {
    /// Create a new expense service
    pub fn new(store: &'a S, cache: &'a SummaryCache) -> Self {
        Self { store, cache }
    }

    fn validated(input: NewExpense) -> PennywiseResult<NewExpense> {
        input
            .validate()
            .map_err(|e| PennywiseError::Validation(e.to_string()))?;
        Ok(input)
    }

    /// Record a new expense
    pub fn add(&self, input: NewExpense) -> PennywiseResult<ExpenseId> {
        let input = Self::validated(input)?;

        let result = self.store.add_expense(input);
        self.cache.invalidate_expenses();
        result
    }

    /// Replace every field of an existing expense
    pub fn update(&self, id: ExpenseId, input: NewExpense) -> PennywiseResult<()> {
        let input = Self::validated(input)?;

        let result = self.store.update_expense(id, input);
        self.cache.invalidate_expenses();
        result
    }

    /// Permanently delete an expense
    pub fn delete(&self, id: ExpenseId) -> PennywiseResult<()> {
        let result = self.store.delete_expense(id);
        self.cache.invalidate_expenses();
        result
    }

    /// Get an expense by ID, failing if it does not exist
    pub fn get(&self, id: ExpenseId) -> PennywiseResult<Expense> {
        self.store
            .get_expense(id)?
            .ok_or_else(|| PennywiseError::expense_not_found(id.to_string()))
    }
}
