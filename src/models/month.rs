//! Calendar month scoping
//!
//! Every aggregate in Pennywise is scoped to one calendar month. `MonthYear`
//! names that month and `CalendarZone` decides which calendar a stored UTC
//! timestamp is read in when asking "which month does this expense belong to".

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    /// Create a month, rejecting months outside 1-12
    pub fn new(month: u32, year: i32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month a calendar date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // year/month are validated at construction, day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Check if a calendar date falls within this month
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Check if a stored timestamp falls within this month when read in `zone`
    pub fn contains(&self, timestamp: &DateTime<Utc>, zone: CalendarZone) -> bool {
        self.contains_date(zone.local_date(timestamp))
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-friendly name, e.g. "March 2024"
    pub fn friendly(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Parse a month string in "YYYY-MM" format
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(month, year)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format: '{}'. Use YYYY-MM", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

/// The calendar used to read stored timestamps as dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarZone {
    /// The machine's local time zone
    #[default]
    Local,
    /// Coordinated universal time
    Utc,
    /// A fixed offset east of UTC
    Fixed { offset_minutes: i32 },
}

impl CalendarZone {
    /// The calendar date of a timestamp in this zone
    pub fn local_date(&self, timestamp: &DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Local => timestamp.with_timezone(&Local).date_naive(),
            Self::Utc => timestamp.date_naive(),
            Self::Fixed { offset_minutes } => match FixedOffset::east_opt(offset_minutes * 60) {
                Some(offset) => timestamp.with_timezone(&offset).date_naive(),
                None => timestamp.date_naive(),
            },
        }
    }

    /// The timestamp stored for a user-entered calendar date
    ///
    /// Midday in the zone, so the date reads back unchanged in the same zone
    /// across DST transitions.
    pub fn timestamp_for(&self, date: NaiveDate) -> DateTime<Utc> {
        let midday = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        let resolved = match self {
            Self::Local => Local
                .from_local_datetime(&midday)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Utc => Some(midday.and_utc()),
            Self::Fixed { offset_minutes } => FixedOffset::east_opt(offset_minutes * 60)
                .and_then(|offset| offset.from_local_datetime(&midday).earliest())
                .map(|dt| dt.with_timezone(&Utc)),
        };
        resolved.unwrap_or_else(|| midday.and_utc())
    }
}
