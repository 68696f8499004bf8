//! Calendar dates.
//!
//! `CalendarDate` is a thin wrapper around `chrono::NaiveDate` that only
//! exposes the arithmetic calendar views need. Weekday indices are
//! Sunday-based (Sunday = 0) throughout the crate.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalTileError, CalTileResult};

/// A concrete, always valid (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CalTileResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                CalTileError::InvalidArgument(format!(
                    "{year:04}-{month:02}-{day:02} is not a calendar date"
                ))
            })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Day of the week, Sunday = 0 through Saturday = 6.
    pub fn weekday_index(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn add_days(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    /// Shift by whole months, clamping the day to the target month's length
    /// (Jan 31 + 1 month = Feb 28/29).
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.map(Self)
    }

    /// The Sunday on or before this date.
    pub fn start_of_week(&self) -> Option<Self> {
        self.add_days(-i64::from(self.weekday_index()))
    }

    pub fn first_of_month(&self) -> Self {
        // Day 1 of an existing month always exists
        Self(self.0 - Duration::days(i64::from(self.0.day0())))
    }

    pub fn last_of_month(&self) -> Option<Self> {
        let len = days_in_month(self.year(), self.month()).ok()?;
        self.first_of_month().add_days(i64::from(len) - 1)
    }

    pub fn at_hour(&self, hour: u32) -> Option<NaiveDateTime> {
        self.0.and_hms_opt(hour, 0, 0)
    }

    /// The date part of a wall-clock instant.
    pub fn of(instant: &NaiveDateTime) -> Self {
        Self(instant.date())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = CalTileError;

    /// Parse YYYY-MM-DD
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| {
                CalTileError::InvalidArgument(format!(
                    "Invalid date format '{}'. Expected YYYY-MM-DD",
                    s
                ))
            })
    }
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> CalTileResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CalTileError::InvalidArgument(format!("month {month} of year {year} is out of range"))
    })?;
    let next = first.checked_add_months(Months::new(1)).ok_or_else(|| {
        CalTileError::InvalidArgument(format!("year {year} is out of range"))
    })?;
    Ok((next - first).num_days() as u32)
}
