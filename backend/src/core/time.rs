//! Calendar dates for the scheduler
//!
//! The scheduler runs on a simplified calendar: every month has 30 days and
//! every year has 12 months. Time only moves forward, one day tick at a time.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Days in every month of the simplified calendar
pub const DAYS_PER_MONTH: u8 = 30;

/// Months in every year of the simplified calendar
pub const MONTHS_PER_YEAR: u8 = 12;

/// Errors that can occur when building a date
#[derive(Debug, Error, PartialEq)]
pub enum DateError {
    #[error("Day {0} is out of range 1..=30")]
    InvalidDay(u8),

    #[error("Month {0} is out of range 1..=12")]
    InvalidMonth(u8),

    #[error("Advancing {days} days from {from} passes the last representable year")]
    YearOverflow { from: Date, days: u32 },
}

/// A day on the 12 x 30 calendar
///
/// Dates order chronologically (year, then month, then day). Years may be
/// negative.
///
/// # Example
/// ```
/// use event_manager_core::Date;
///
/// let mut date = Date::new(30, 12, 2024).unwrap();
/// date.tick().unwrap();
/// assert_eq!(date, Date::new(1, 1, 2025).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDate", into = "RawDate")]
pub struct Date {
    day: u8,
    month: u8,
    year: i32,
}

/// Unchecked wire form of a [`Date`]; validated on the way in
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawDate {
    day: u8,
    month: u8,
    year: i32,
}

impl Date {
    /// Create a date, validating the day and month ranges
    ///
    /// # Errors
    /// Returns [`DateError`] when `day` is outside 1..=30 or `month` outside 1..=12.
    pub fn new(day: u8, month: u8, year: i32) -> Result<Self, DateError> {
        if !(1..=DAYS_PER_MONTH).contains(&day) {
            return Err(DateError::InvalidDay(day));
        }
        if !(1..=MONTHS_PER_YEAR).contains(&month) {
            return Err(DateError::InvalidMonth(month));
        }
        Ok(Self { day, month, year })
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Advance by exactly one day
    ///
    /// Day 30 wraps to day 1 of the next month, and month 12 wraps to month 1
    /// of the next year.
    ///
    /// # Errors
    /// Returns [`DateError::YearOverflow`] on the last day of year `i32::MAX`;
    /// the date is left unchanged.
    pub fn tick(&mut self) -> Result<(), DateError> {
        *self = self.advanced_by(1)?;
        Ok(())
    }

    fn next_day(&self) -> Option<Self> {
        let mut next = *self;
        if next.day < DAYS_PER_MONTH {
            next.day += 1;
        } else if next.month < MONTHS_PER_YEAR {
            next.day = 1;
            next.month += 1;
        } else {
            next.year = next.year.checked_add(1)?;
            next.day = 1;
            next.month = 1;
        }
        Some(next)
    }

    /// Return the date `days` ticks after this one
    ///
    /// # Example
    /// ```
    /// use event_manager_core::Date;
    ///
    /// let date = Date::new(25, 1, 2024).unwrap();
    /// assert_eq!(date.advanced_by(10), Ok(Date::new(5, 2, 2024).unwrap()));
    /// ```
    ///
    /// # Errors
    /// Returns [`DateError::YearOverflow`] when the result would fall after
    /// year `i32::MAX`.
    pub fn advanced_by(&self, days: u32) -> Result<Self, DateError> {
        let mut date = *self;
        for _ in 0..days {
            date = date
                .next_day()
                .ok_or(DateError::YearOverflow { from: *self, days })?;
        }
        Ok(date)
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.month.cmp(&other.month))
            .then(self.day.cmp(&other.day))
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders as `day.month.year`, the report format
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.day, self.month, self.year)
    }
}

impl TryFrom<RawDate> for Date {
    type Error = DateError;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        Date::new(raw.day, raw.month, raw.year)
    }
}

impl From<Date> for RawDate {
    fn from(date: Date) -> Self {
        RawDate {
            day: date.day,
            month: date.month,
            year: date.year,
        }
    }
}
