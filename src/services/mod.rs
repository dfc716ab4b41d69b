//! Service layer for Pennywise
//!
//! The service layer sits on top of a [`RecordStore`](crate::storage::RecordStore):
//! mutation services validate input and keep the month cache honest, and the
//! query service aggregates month data into totals and savings.

pub mod aggregate;
pub mod cache;
pub mod earning;
pub mod expense;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregate::{CategoryShare, CategoryTotals, MonthlySummary};
pub use cache::SummaryCache;
pub use earning::EarningService;
pub use expense::ExpenseService;
pub use query::QueryService;
