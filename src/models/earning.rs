//! Monthly earnings model
//!
//! Records what the user earned in one calendar month. There is at most one
//! record per month; setting it again overwrites the amount.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::EarningId;
use super::money::Money;
use super::month::MonthYear;

/// Validation errors for earnings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EarningValidationError {
    NonPositiveAmount,
    AmountTooLarge,
}

impl std::fmt::Display for EarningValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Earnings amount must be a positive number"),
            Self::AmountTooLarge => {
                write!(f, "Earnings amount may not exceed {}", Money::MAX_AMOUNT)
            }
        }
    }
}

impl std::error::Error for EarningValidationError {}

/// Earnings for a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earning {
    pub id: EarningId,
    pub month: MonthYear,
    pub amount: Money,
    pub created_at: DateTime<Utc>,
    /// When the amount was last set
    pub updated_at: DateTime<Utc>,
}

impl Earning {
    /// Create a new earnings record
    pub fn new(id: EarningId, month: MonthYear, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id,
            month,
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Check an amount before it is stored
    pub fn validate_amount(amount: Money) -> Result<(), EarningValidationError> {
        if !amount.is_positive() {
            return Err(EarningValidationError::NonPositiveAmount);
        }
        if !amount.is_valid_amount() {
            return Err(EarningValidationError::AmountTooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_earning() {
        let month = MonthYear::new(6, 2024).unwrap();
        let earning = Earning::new(EarningId::new(1), month, Money::from_units(500));

        assert_eq!(earning.month, month);
        assert_eq!(earning.amount.units(), 500);
        assert_eq!(earning.created_at, earning.updated_at);
    }

    #[test]
    fn test_set_amount() {
        let month = MonthYear::new(6, 2024).unwrap();
        let mut earning = Earning::new(EarningId::new(1), month, Money::from_units(500));
        let original_updated = earning.updated_at;

        earning.set_amount(Money::from_units(650));
        assert_eq!(earning.amount.units(), 650);
        assert_eq!(earning.id, EarningId::new(1));
        assert!(earning.updated_at >= original_updated);
    }

    #[test]
    fn test_validate_amount() {
        assert!(Earning::validate_amount(Money::from_units(1)).is_ok());
        assert_eq!(
            Earning::validate_amount(Money::zero()),
            Err(EarningValidationError::NonPositiveAmount)
        );
        assert_eq!(
            Earning::validate_amount(Money::from_units(-100)),
            Err(EarningValidationError::NonPositiveAmount)
        );
        assert!(Earning::validate_amount(Money::MAX_AMOUNT).is_ok());
        assert_eq!(
            Earning::validate_amount(Money::from_units(i64::MAX)),
            Err(EarningValidationError::AmountTooLarge)
        );
    }

    #[test]
    fn test_serialization() {
        let month = MonthYear::new(6, 2024).unwrap();
        let earning = Earning::new(EarningId::new(3), month, Money::from_units(500));

        let json = serde_json::to_string(&earning).unwrap();
        let deserialized: Earning = serde_json::from_str(&json).unwrap();

        assert_eq!(earning, deserialized);
    }
}
