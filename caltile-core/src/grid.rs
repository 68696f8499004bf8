//! Month grid tiling.
//!
//! A month is laid out as Sunday-first week rows of seven cells. Cells before
//! day 1 and after the last day are filled with the neighbouring months' days.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::date::{CalendarDate, days_in_month};
use crate::error::{CalTileError, CalTileResult};

pub const DAYS_PER_WEEK: usize = 7;

/// Row count used by `RowPolicy::FixedSix`; enough for any month.
pub const FIXED_ROWS: usize = 6;

/// How many week rows a month grid has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPolicy {
    /// Always six rows, so the grid height doesn't jump between months.
    #[default]
    FixedSix,
    /// Only the rows the month touches (4 to 6).
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDate,
    pub day_of_month: u32,
    pub belongs_to_requested_month: bool,
}

pub type Week = [DayCell; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    pub fn first_date(&self) -> Option<CalendarDate> {
        self.weeks.first().map(|week| week[0].date)
    }

    pub fn last_date(&self) -> Option<CalendarDate> {
        self.weeks.last().map(|week| week[DAYS_PER_WEEK - 1].date)
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => first <= date && date <= last,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GridBuilder {
    row_policy: RowPolicy,
}

impl GridBuilder {
    pub fn new(row_policy: RowPolicy) -> Self {
        GridBuilder { row_policy }
    }

    /// Tile `month` (1-12) of `year` into week rows.
    pub fn build_month_grid(&self, year: i32, month: u32) -> CalTileResult<MonthGrid> {
        let len = days_in_month(year, month)? as usize;
        let first = CalendarDate::from_ymd(year, month, 1)?;
        let leading = first.weekday_index() as usize;

        let natural_rows = (leading + len).div_ceil(DAYS_PER_WEEK);
        let rows = match self.row_policy {
            RowPolicy::FixedSix => natural_rows.max(FIXED_ROWS),
            RowPolicy::Natural => natural_rows,
        };

        let out_of_range =
            || CalTileError::InvalidArgument(format!("grid for {year:04}-{month:02} is out of range"));
        let start = first.add_days(-(leading as i64)).ok_or_else(out_of_range)?;
        // Every offset below is bounded by this one, so plain addition can't overflow
        start
            .add_days((rows * DAYS_PER_WEEK) as i64 - 1)
            .ok_or_else(out_of_range)?;

        let weeks = (0..rows)
            .map(|row| {
                std::array::from_fn(|col| {
                    let offset = (row * DAYS_PER_WEEK + col) as i64;
                    let date = CalendarDate::from(start.naive() + Duration::days(offset));
                    DayCell {
                        date,
                        day_of_month: date.day(),
                        belongs_to_requested_month: date.year() == year && date.month() == month,
                    }
                })
            })
            .collect();

        Ok(MonthGrid { year, month, weeks })
    }

    /// The Sunday-first week containing `date`.
    pub fn week_of(&self, date: CalendarDate) -> CalTileResult<[CalendarDate; DAYS_PER_WEEK]> {
        let out_of_range =
            || CalTileError::InvalidArgument(format!("week of {date} is out of range"));
        let start = date.start_of_week().ok_or_else(out_of_range)?;
        start
            .add_days(DAYS_PER_WEEK as i64 - 1)
            .ok_or_else(out_of_range)?;

        Ok(std::array::from_fn(|i| {
            CalendarDate::from(start.naive() + Duration::days(i as i64))
        }))
    }
}
