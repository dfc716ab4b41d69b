//! Month aggregation
//!
//! Pure functions and derived views over expense lists: month filtering,
//! per-category totals, and the monthly summary. Nothing here touches the
//! store. Sums use checked arithmetic and report `Overflow` rather than
//! wrapping.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{CalendarZone, Expense, Money, MonthYear};

/// Keep only the expenses whose `date` falls in `month` in the given zone
///
/// Applying the filter to its own output returns the same set.
pub fn expenses_in_month(expenses: &[Expense], month: MonthYear, zone: CalendarZone) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| month.contains(&e.date, zone))
        .cloned()
        .collect()
}

/// Sum of all amounts; zero for an empty list
pub fn total_amount(expenses: &[Expense]) -> PennywiseResult<Money> {
    Money::checked_sum(expenses.iter().map(|e| e.amount))
        .ok_or_else(|| PennywiseError::amount_overflow("expense total"))
}

/// Sum amounts per exact category string
pub fn category_totals<'a, I>(expenses: I) -> PennywiseResult<CategoryTotals>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = CategoryTotals::default();
    for expense in expenses {
        totals.add(&expense.category, expense.amount)?;
    }
    Ok(totals)
}

/// Per-category totals in first-seen order
///
/// Category names are compared exactly: "Food", "food" and " Food" are
/// separate keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(String, Money)>,
    index: HashMap<String, usize>,
    total: Money,
}

impl CategoryTotals {
    fn add(&mut self, category: &str, amount: Money) -> PennywiseResult<()> {
        let total = self
            .total
            .checked_add(amount)
            .ok_or_else(|| PennywiseError::amount_overflow("expense total"))?;

        match self.index.get(category) {
            Some(&i) => {
                let entry = &mut self.entries[i].1;
                *entry = entry
                    .checked_add(amount)
                    .ok_or_else(|| PennywiseError::amount_overflow("category total"))?;
            }
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
        self.total = total;
        Ok(())
    }

    /// Total for one category, if any expense used it
    pub fn get(&self, category: &str) -> Option<Money> {
        self.index.get(category).map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.entries.iter().map(|(c, m)| (c.as_str(), *m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum across all categories
    pub fn total(&self) -> Money {
        self.total
    }

    /// Categories sorted by amount descending, with their share of the total
    ///
    /// Ties keep first-seen order.
    pub fn shares(&self) -> Vec<CategoryShare> {
        let mut shares: Vec<_> = self
            .entries
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: *amount,
                percent: amount.percent_of(self.total).unwrap_or(0.0),
            })
            .collect();
        shares.sort_by(|a, b| b.amount.cmp(&a.amount));
        shares
    }
}

/// One category's slice of a month's spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Money,
    /// Percentage of the month's total, 0-100
    pub percent: f64,
}

/// Everything shown for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: MonthYear,
    /// `None` when no earnings were set for the month
    pub earnings: Option<Money>,
    pub total_expenses: Money,
    /// Earnings (zero if unset) minus expenses; may be negative
    pub savings: Money,
    pub expense_count: usize,
    /// Savings as a percentage of earnings, when earnings are positive
    pub savings_rate: Option<f64>,
    pub breakdown: Vec<CategoryShare>,
}

impl MonthlySummary {
    /// Build a summary from a month's earnings and its already-filtered expenses
    pub fn from_parts(
        month: MonthYear,
        earnings: Option<Money>,
        expenses: &[Expense],
    ) -> PennywiseResult<Self> {
        let totals = category_totals(expenses)?;
        let total_expenses = totals.total();
        let savings = savings_from(earnings, total_expenses)?;
        let savings_rate = earnings.and_then(|e| savings.percent_of(e));

        Ok(Self {
            month,
            earnings,
            total_expenses,
            savings,
            expense_count: expenses.len(),
            savings_rate,
            breakdown: totals.shares(),
        })
    }

    pub fn has_earnings(&self) -> bool {
        self.earnings.is_some()
    }

    /// Spending exceeded earnings
    pub fn is_overspent(&self) -> bool {
        self.savings.is_negative()
    }
}

/// Savings given optional earnings and a month total
pub fn savings_from(earnings: Option<Money>, total_expenses: Money) -> PennywiseResult<Money> {
    earnings
        .unwrap_or_default()
        .checked_sub(total_expenses)
        .ok_or_else(|| PennywiseError::amount_overflow("savings"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::{TimeZone, Utc};
    use quickcheck_macros::quickcheck;

    fn expense(id: u64, amount: i64, category: &str, y: i32, m: u32, d: u32) -> Expense {
        let mut e = Expense::new(
            ExpenseId::new(id),
            crate::models::NewExpense::new(
                Money::from_units(amount),
                category,
                "test",
                Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            ),
        );
        e.created_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        e
    }

    fn march() -> MonthYear {
        MonthYear::new(3, 2024).unwrap()
    }

    fn scenario_expenses() -> Vec<Expense> {
        vec![
            expense(1, 50, "Food", 2024, 3, 5),
            expense(2, 30, "Food", 2024, 3, 10),
            expense(3, 20, "Transport", 2024, 3, 12),
        ]
    }

    #[test]
    fn test_total_amount() {
        assert_eq!(total_amount(&[]).unwrap(), Money::zero());
        assert_eq!(total_amount(&scenario_expenses()).unwrap().units(), 100);
    }

    #[test]
    fn test_category_totals_first_seen_order() {
        let totals = category_totals(&scenario_expenses()).unwrap();

        let pairs: Vec<_> = totals.iter().map(|(c, m)| (c, m.units())).collect();
        assert_eq!(pairs, vec![("Food", 80), ("Transport", 20)]);
        assert_eq!(totals.total(), total_amount(&scenario_expenses()).unwrap());
    }

    #[test]
    fn test_category_totals_empty() {
        let totals = category_totals(&Vec::<Expense>::new()).unwrap();
        assert!(totals.is_empty());
        assert_eq!(totals.total(), Money::zero());
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let expenses = vec![
            expense(1, 10, "Food", 2024, 3, 1),
            expense(2, 5, "food", 2024, 3, 2),
        ];
        let totals = category_totals(&expenses).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Food").unwrap().units(), 10);
        assert_eq!(totals.get("food").unwrap().units(), 5);
        assert!(totals.get("FOOD").is_none());
    }

    #[test]
    fn test_month_filter_uses_date_not_created_at() {
        let mut expenses = scenario_expenses();
        expenses.push(expense(4, 99, "Rent", 2024, 2, 28));

        let filtered = expenses_in_month(&expenses, march(), CalendarZone::Utc);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|e| e.category != "Rent"));
    }

    #[test]
    fn test_month_filter_is_idempotent() {
        let mut expenses = scenario_expenses();
        expenses.push(expense(4, 99, "Rent", 2024, 4, 1));

        let once = expenses_in_month(&expenses, march(), CalendarZone::Utc);
        let twice = expenses_in_month(&once, march(), CalendarZone::Utc);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_month_filter_respects_zone() {
        // 23:30 UTC on March 31 is already April 1 at UTC+2
        let late = Expense::new(
            ExpenseId::new(1),
            crate::models::NewExpense::new(
                Money::from_units(10),
                "Food",
                "late",
                Utc.with_ymd_and_hms(2024, 3, 31, 23, 30, 0).unwrap(),
            ),
        );
        let expenses = vec![late];
        let plus_two = CalendarZone::Fixed { offset_minutes: 120 };

        assert_eq!(expenses_in_month(&expenses, march(), CalendarZone::Utc).len(), 1);
        assert!(expenses_in_month(&expenses, march(), plus_two).is_empty());
        assert_eq!(
            expenses_in_month(&expenses, march().next(), plus_two).len(),
            1
        );
    }

    #[test]
    fn test_summary_scenario_with_earnings() {
        let summary =
            MonthlySummary::from_parts(march(), Some(Money::from_units(200)), &scenario_expenses())
                .unwrap();

        assert_eq!(summary.total_expenses.units(), 100);
        assert_eq!(summary.savings.units(), 100);
        assert_eq!(summary.expense_count, 3);
        assert_eq!(summary.savings_rate, Some(50.0));
        assert_eq!(summary.breakdown[0].category, "Food");
        assert_eq!(summary.breakdown[0].percent, 80.0);
        assert_eq!(summary.breakdown[1].category, "Transport");
    }

    #[test]
    fn test_summary_without_earnings_is_negative() {
        let expenses = vec![
            expense(1, 25, "Food", 2024, 4, 2),
            expense(2, 15, "Fun", 2024, 4, 3),
        ];
        let april = march().next();
        let summary = MonthlySummary::from_parts(april, None, &expenses).unwrap();

        assert!(!summary.has_earnings());
        assert_eq!(summary.savings.units(), -40);
        assert!(summary.is_overspent());
        assert!(summary.savings_rate.is_none());
    }

    #[test]
    fn test_shares_sorted_descending() {
        let expenses = vec![
            expense(1, 5, "Small", 2024, 3, 1),
            expense(2, 50, "Big", 2024, 3, 2),
            expense(3, 20, "Mid", 2024, 3, 3),
        ];
        let shares = category_totals(&expenses).unwrap().shares();
        let order: Vec<_> = shares.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(order, vec!["Big", "Mid", "Small"]);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let half = i64::MAX / 2 + 1;
        let expenses = vec![
            expense(1, half, "Rent", 2024, 3, 1),
            expense(2, half, "Rent", 2024, 3, 2),
        ];

        assert!(total_amount(&expenses).unwrap_err().is_overflow());
        assert!(category_totals(&expenses).unwrap_err().is_overflow());
        assert!(MonthlySummary::from_parts(march(), None, &expenses)
            .unwrap_err()
            .is_overflow());
    }

    #[test]
    fn test_overflowing_savings_is_an_error() {
        let err = savings_from(Some(Money::from_units(i64::MIN)), Money::from_units(1)).unwrap_err();
        assert!(err.is_overflow());
    }

    /// Category names that differ only in case or surrounding whitespace
    const CATEGORY_POOL: &[&str] = &["Food", "food", " Food", "Food ", "FOOD", "Transport", "Rent"];

    #[quickcheck]
    fn category_totals_sum_to_total_amount(entries: Vec<(u8, u16)>) -> bool {
        let expenses: Vec<Expense> = entries
            .iter()
            .enumerate()
            .map(|(i, (pick, amount))| {
                let category = CATEGORY_POOL[*pick as usize % CATEGORY_POOL.len()];
                expense(i as u64 + 1, *amount as i64 + 1, category, 2024, 3, 1)
            })
            .collect();

        let totals = category_totals(&expenses).unwrap();
        let summed = Money::checked_sum(totals.iter().map(|(_, m)| m)).unwrap();
        let distinct: std::collections::HashSet<_> =
            expenses.iter().map(|e| e.category.as_str()).collect();

        summed == total_amount(&expenses).unwrap()
            && totals.total() == summed
            && totals.len() == distinct.len()
    }
}
