/// Canonical calendar-day identity
///
/// Every day comparison in the crate goes through `DateKey`. It wraps a
/// `NaiveDate`, so there is no time-of-day component to skew comparisons and
/// ordering is purely (year, month, day).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Earliest and latest years a key may carry; keys must print as four digits
pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9999;

/// A single local calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// The local calendar day at call time
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Build a key from a year, a one-based month and a day of month
    ///
    /// Parts that do not name a real calendar day are rejected rather than
    /// rolled over into the next month, as are years outside `MIN_YEAR..=MAX_YEAR`.
    pub fn from_parts(year: i32, month: u32, day: u32) -> Result<Self, DomainError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .filter(in_range)
            .map(Self)
            .ok_or_else(|| {
                DomainError::InvalidDate(format!(
                    "{:04}-{:02}-{:02} is not a calendar date",
                    year, month, day
                ))
            })
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// One-based month (January = 1)
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// True when `self` is strictly earlier than `other`
    pub fn is_before(&self, other: &DateKey) -> bool {
        self.0 < other.0
    }

    pub fn is_same_day(&self, other: &DateKey) -> bool {
        self.0 == other.0
    }

    /// Shift by `days` (negative moves backward), saturating at the supported years
    pub fn add_days(&self, days: i64) -> DateKey {
        let shifted = Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .filter(in_range);

        match shifted {
            Some(date) => Self(date),
            None if days < 0 => NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).map_or(*self, Self),
            None => NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).map_or(*self, Self),
        }
    }

    /// Signed number of days from `self` to `other`
    pub fn days_until(&self, other: &DateKey) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Human label for a day relative to `today`
    pub fn relative_label(&self, today: &DateKey) -> String {
        match today.days_until(self) {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            -1 => "Yesterday".to_string(),
            _ => self.0.format("%B %-d").to_string(),
        }
    }

    /// Seven consecutive days starting three days before `self`
    pub fn week_strip(&self) -> Vec<DateKey> {
        (-3..=3).map(|offset| self.add_days(offset)).collect()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = DomainError;

    /// Parse a `yyyy-MM-dd` day
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .filter(in_range)
            .map(Self)
            .ok_or_else(|| DomainError::InvalidDate(format!("'{}' is not a yyyy-MM-dd date", s)))
    }
}

fn in_range(date: &NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Cells of a Sunday-first month calendar
///
/// Leading `None` cells pad the first week up to the weekday of the 1st.
pub fn month_grid(year: i32, month: u32) -> Result<Vec<Option<DateKey>>, DomainError> {
    let first = DateKey::from_parts(year, month, 1)?;
    let leading = first.as_naive().weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<DateKey>> = vec![None; leading];
    let mut day = first;
    while day.month() == month && day.year() == year {
        cells.push(Some(day));
        let next = day.add_days(1);
        if next == day {
            break;
        }
        day = next;
    }

    Ok(cells)
}

/// Source of "today" for a tracker session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Local calendar day at each call
    #[default]
    System,
    /// Pinned reference day
    Fixed(DateKey),
}

impl Clock {
    pub fn today(&self) -> DateKey {
        match self {
            Clock::System => DateKey::today(),
            Clock::Fixed(day) => *day,
        }
    }
}
