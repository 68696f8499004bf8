//! Attributing events to day cells and hour rows.
//!
//! Day bins key on the event's start date. Hour bins use inclusive-span
//! semantics: an event occupies every row `h` with `start_hour <= h < end_hour`,
//! where `end_hour` is the end instant rounded up to the next full hour. So
//! 09:00-11:00 shows in rows 9 and 10, and 09:15-10:30 in rows 9 and 10 too.
//! A zero-length event occupies only its start row.

use std::collections::BTreeMap;

use chrono::Duration;

use crate::date::CalendarDate;
use crate::error::{CalTileError, CalTileResult};
use crate::event::{AllDayPolicy, CalendarEvent};
use crate::grid::DayCell;

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, Default)]
pub struct EventBinner {
    all_day_policy: AllDayPolicy,
}

impl EventBinner {
    pub fn new(all_day_policy: AllDayPolicy) -> Self {
        EventBinner { all_day_policy }
    }

    /// Bucket events onto the given cells by start date.
    ///
    /// Every cell gets an entry, empty or not. Events starting outside the
    /// cells are dropped. Each bin is ordered by start, ties keep input order.
    pub fn bin_by_day<'a, 'c>(
        &self,
        events: &'a [CalendarEvent],
        cells: impl IntoIterator<Item = &'c DayCell>,
    ) -> BTreeMap<CalendarDate, Vec<&'a CalendarEvent>> {
        let mut bins: BTreeMap<CalendarDate, Vec<&'a CalendarEvent>> = cells
            .into_iter()
            .map(|cell| (cell.date, Vec::new()))
            .collect();

        for event in events {
            if let Some(bin) = bins.get_mut(&event.start_date()) {
                bin.push(event);
            }
        }

        for bin in bins.values_mut() {
            bin.sort_by_key(|e| e.start);
        }

        bins
    }

    /// Timed events whose active interval covers `hour` of `day`.
    ///
    /// All-day events never appear here. A zero-length timed event occupies
    /// only the row it starts in.
    pub fn bin_by_hour<'a>(
        &self,
        events: &'a [CalendarEvent],
        day: CalendarDate,
        hour: u32,
    ) -> CalTileResult<Vec<&'a CalendarEvent>> {
        let slot_start = day.at_hour(hour).ok_or_else(|| {
            CalTileError::InvalidArgument(format!(
                "hour {hour} is outside 0..{HOURS_PER_DAY}"
            ))
        })?;
        let slot_end = slot_start
            .checked_add_signed(Duration::hours(1))
            .ok_or_else(|| {
                CalTileError::InvalidArgument(format!("hour {hour} of {day} is out of range"))
            })?;

        let mut bin = Vec::new();
        for event in events {
            if event.is_all_day(self.all_day_policy) {
                continue;
            }
            event.validate()?;

            let end = event.effective_end();
            let covers = if end == event.start {
                slot_start <= event.start && event.start < slot_end
            } else {
                event.start < slot_end && end > slot_start
            };
            if covers {
                bin.push(event);
            }
        }

        bin.sort_by_key(|e| e.start);
        Ok(bin)
    }

    /// All-day events starting on `day`, in input order.
    pub fn all_day_events<'a>(
        &self,
        events: &'a [CalendarEvent],
        day: CalendarDate,
    ) -> Vec<&'a CalendarEvent> {
        events
            .iter()
            .filter(|e| e.is_all_day(self.all_day_policy) && e.start_date() == day)
            .collect()
    }

    /// Events starting on or after `from`, grouped by start date.
    pub fn group_upcoming<'a>(
        &self,
        events: &'a [CalendarEvent],
        from: CalendarDate,
    ) -> Vec<(CalendarDate, Vec<&'a CalendarEvent>)> {
        let mut groups: BTreeMap<CalendarDate, Vec<&'a CalendarEvent>> = BTreeMap::new();
        for event in events.iter().filter(|e| e.start_date() >= from) {
            groups.entry(event.start_date()).or_default().push(event);
        }

        groups
            .into_iter()
            .map(|(date, mut bin)| {
                bin.sort_by_key(|e| e.start);
                (date, bin)
            })
            .collect()
    }
}
