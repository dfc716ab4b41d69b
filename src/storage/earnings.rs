//! Monthly earnings repository
//!
//! Handles persistence of monthly earnings to earnings.json. There is exactly
//! one record per month; setting a month again overwrites its amount. A set
//! that cannot be written leaves the previous record in place.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PennywiseError;
use crate::models::{Earning, EarningId, Money, MonthYear};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct EarningData {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    earnings: Vec<Earning>,
}

impl Default for EarningData {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            earnings: Vec::new(),
        }
    }
}

fn first_id() -> u64 {
    1
}

fn lock_error(e: impl std::fmt::Display) -> PennywiseError {
    PennywiseError::StoreUnavailable(format!("Failed to acquire lock: {}", e))
}

/// Repository for monthly earnings
pub struct EarningRepository {
    path: PathBuf,
    earnings: RwLock<HashMap<MonthYear, Earning>>,
    next_id: RwLock<EarningId>,
}

impl EarningRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            earnings: RwLock::new(HashMap::new()),
            next_id: RwLock::new(EarningId::new(first_id())),
        }
    }

    /// Load earnings from disk
    ///
    /// Should the file hold more than one record for a month, the most
    /// recently set one wins.
    pub fn load(&self) -> Result<(), PennywiseError> {
        let file_data: EarningData = read_json(&self.path)?;

        let mut earnings = self.earnings.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        earnings.clear();
        let mut next = EarningId::new(file_data.next_id.max(first_id()));
        for earning in file_data.earnings {
            if earning.id >= next {
                next = earning.id.next();
            }
            let keep = earnings
                .get(&earning.month)
                .map_or(true, |existing| earning.updated_at >= existing.updated_at);
            if keep {
                earnings.insert(earning.month, earning);
            }
        }
        *next_id = next;

        Ok(())
    }

    fn write_file(
        &self,
        earnings: &HashMap<MonthYear, Earning>,
        next_id: EarningId,
    ) -> Result<(), PennywiseError> {
        let mut list: Vec<_> = earnings.values().cloned().collect();
        list.sort_by(|a, b| a.month.cmp(&b.month));

        let file_data = EarningData {
            next_id: next_id.value(),
            earnings: list,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the earnings record for a month
    pub fn get_for_month(&self, month: MonthYear) -> Result<Option<Earning>, PennywiseError> {
        let earnings = self.earnings.read().map_err(lock_error)?;
        Ok(earnings.get(&month).cloned())
    }

    /// Create or overwrite the earnings for a month
    ///
    /// Returns the previous record, if any, and the current one.
    pub fn set(
        &self,
        month: MonthYear,
        amount: Money,
    ) -> Result<(Option<Earning>, Earning), PennywiseError> {
        let mut earnings = self.earnings.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        let previous = earnings.get(&month).cloned();
        let (current, next) = match &previous {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.set_amount(amount);
                (updated, *next_id)
            }
            None => (Earning::new(*next_id, month, amount), next_id.next()),
        };

        earnings.insert(month, current.clone());
        if let Err(e) = self.write_file(&earnings, next) {
            match &previous {
                Some(existing) => earnings.insert(month, existing.clone()),
                None => earnings.remove(&month),
            };
            return Err(e);
        }
        *next_id = next;

        Ok((previous, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EarningRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = EarningRepository::new(temp_dir.path().join("earnings.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn june() -> MonthYear {
        MonthYear::new(6, 2024).unwrap()
    }

    #[test]
    fn test_set_and_get() {
        let (_temp_dir, repo) = create_test_repo();

        assert!(repo.get_for_month(june()).unwrap().is_none());

        let (before, earning) = repo.set(june(), Money::from_units(500)).unwrap();
        assert!(before.is_none());
        assert_eq!(earning.id, EarningId::new(1));

        let retrieved = repo.get_for_month(june()).unwrap().unwrap();
        assert_eq!(retrieved.amount.units(), 500);
    }

    #[test]
    fn test_set_twice_overwrites() {
        let (_temp_dir, repo) = create_test_repo();

        let (_, first) = repo.set(june(), Money::from_units(500)).unwrap();
        let (before, second) = repo.set(june(), Money::from_units(650)).unwrap();

        assert_eq!(before.unwrap().amount.units(), 500);
        assert_eq!(second.id, first.id);
        assert_eq!(repo.get_for_month(june()).unwrap().unwrap().amount.units(), 650);
    }

    #[test]
    fn test_set_persists() {
        let (temp_dir, repo) = create_test_repo();
        repo.set(june(), Money::from_units(500)).unwrap();
        repo.set(june().next(), Money::from_units(700)).unwrap();

        let repo2 = EarningRepository::new(temp_dir.path().join("earnings.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.get_for_month(june()).unwrap().unwrap().amount.units(), 500);
        assert_eq!(
            repo2.get_for_month(june().next()).unwrap().unwrap().amount.units(),
            700
        );

        let (_, third) = repo2.set(june().prev(), Money::from_units(1)).unwrap();
        assert_eq!(third.id, EarningId::new(3));
    }

    #[test]
    fn test_load_keeps_latest_duplicate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("earnings.json");

        let mut older = Earning::new(EarningId::new(1), june(), Money::from_units(100));
        older.updated_at = older.updated_at - chrono::Duration::days(1);
        let newer = Earning::new(EarningId::new(2), june(), Money::from_units(300));
        let data = EarningData {
            next_id: 3,
            earnings: vec![newer, older],
        };
        write_json_atomic(&path, &data).unwrap();

        let repo = EarningRepository::new(path);
        repo.load().unwrap();
        assert_eq!(repo.get_for_month(june()).unwrap().unwrap().amount.units(), 300);
    }

    fn block_writes(temp_dir: &TempDir) {
        let path = temp_dir.path().join("earnings.json");
        if path.exists() {
            std::fs::remove_file(&path).unwrap();
        }
        std::fs::create_dir(&path).unwrap();
    }

    #[test]
    fn test_failed_first_set_leaves_month_unset() {
        let (temp_dir, repo) = create_test_repo();
        block_writes(&temp_dir);

        let err = repo.set(june(), Money::from_units(500)).unwrap_err();
        assert!(err.is_store_unavailable());
        assert!(repo.get_for_month(june()).unwrap().is_none());
    }

    #[test]
    fn test_failed_overwrite_keeps_previous_amount() {
        let (temp_dir, repo) = create_test_repo();
        let (_, original) = repo.set(june(), Money::from_units(500)).unwrap();
        block_writes(&temp_dir);

        assert!(repo.set(june(), Money::from_units(900)).is_err());
        assert_eq!(repo.get_for_month(june()).unwrap(), Some(original));
    }
}
