//! Earnings service
//!
//! Sets the income earned in a month. A month has at most one earnings
//! record; setting it again overwrites the amount.

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{Earning, EarningId, Money, MonthYear};
use crate::storage::RecordStore;

use super::cache::SummaryCache;

/// Service for monthly earnings
pub struct EarningService<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    cache: &'a SummaryCache,
}

impl<'a, S: RecordStore + ?Sized> EarningService<'a, S> {
    /// Create a new earnings service
    pub fn new(store: &'a S, cache: &'a SummaryCache) -> Self {
        Self { store, cache }
    }

    /// Set the earnings for a month, replacing any earlier amount
    pub fn set(&self, amount: Money, month: MonthYear) -> PennywiseResult<EarningId> {
        Earning::validate_amount(amount).map_err(|e| PennywiseError::Validation(e.to_string()))?;

        let result = self.store.set_monthly_earnings(amount, month);
        self.cache.invalidate_earnings(month);
        result
    }

    /// The earnings for a month, bypassing the cache
    pub fn get(&self, month: MonthYear) -> PennywiseResult<Option<Earning>> {
        self.store.get_monthly_earnings(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalendarZone;
    use crate::services::query::QueryService;
    use crate::services::test_support::{month, temp_storage, CountingStore};

    #[test]
    fn test_set_twice_keeps_latest() {
        let (_temp_dir, storage) = temp_storage();
        let cache = SummaryCache::default();
        let service = EarningService::new(&storage, &cache);
        let june = month(6, 2024);

        let first = service.set(Money::from_units(500), june).unwrap();
        let second = service.set(Money::from_units(650), june).unwrap();

        assert_eq!(first, second);
        let earning = service.get(june).unwrap().unwrap();
        assert_eq!(earning.amount.units(), 650);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let (_temp_dir, storage) = temp_storage();
        let cache = SummaryCache::default();
        let service = EarningService::new(&storage, &cache);
        let june = month(6, 2024);

        assert!(service.set(Money::zero(), june).unwrap_err().is_validation());
        assert!(service
            .set(Money::from_units(-5), june)
            .unwrap_err()
            .is_validation());
        assert!(service.get(june).unwrap().is_none());
    }

    #[test]
    fn test_set_invalidates_only_that_month() {
        let (_temp_dir, storage) = temp_storage();
        let store = CountingStore::new(storage);
        let cache = SummaryCache::default();
        let service = EarningService::new(&store, &cache);
        let query = QueryService::new(&store, &cache, CalendarZone::Utc);
        let june = month(6, 2024);
        let july = month(7, 2024);

        assert!(query.earnings_for_month(june).unwrap().is_none());
        assert!(query.earnings_for_month(july).unwrap().is_none());
        assert_eq!(query.savings(june).unwrap(), Money::zero());

        service.set(Money::from_units(500), june).unwrap();

        assert_eq!(cache.earnings(july), Some(None));
        assert!(cache.earnings(june).is_none());
        assert_eq!(query.savings(june).unwrap().units(), 500);
        assert_eq!(
            query.earnings_for_month(june).unwrap().unwrap().amount.units(),
            500
        );
    }

    #[test]
    fn test_store_failure_surfaces() {
        let (_temp_dir, storage) = temp_storage();
        let store = CountingStore::new(storage);
        store.set_failing(true);
        let cache = SummaryCache::default();
        let service = EarningService::new(&store, &cache);

        let err = service.set(Money::from_units(10), month(1, 2024)).unwrap_err();
        assert!(err.is_store_unavailable());
    }
}
