//! View models for the month, week, day and list views.
//!
//! `Planner` wires a grid builder, binner and layouter together and runs the
//! event list through them in one pass per view.

use std::collections::BTreeMap;

use crate::binning::{EventBinner, HOURS_PER_DAY};
use crate::config::CaltileConfig;
use crate::date::CalendarDate;
use crate::error::CalTileResult;
use crate::event::CalendarEvent;
use crate::grid::{GridBuilder, MonthGrid};
use crate::layout::{OverlapLayouter, PlacedEvent};

#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub grid: MonthGrid,
    pub bins: BTreeMap<CalendarDate, Vec<&'a CalendarEvent>>,
}

impl<'a> MonthView<'a> {
    pub fn events_on(&self, date: CalendarDate) -> &[&'a CalendarEvent] {
        self.bins.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One day of a time grid: the all-day row plus 24 hour rows.
#[derive(Debug, Clone)]
pub struct DayColumn<'a> {
    pub date: CalendarDate,
    pub all_day: Vec<&'a CalendarEvent>,
    pub hours: Vec<Vec<PlacedEvent<'a>>>,
}

impl DayColumn<'_> {
    pub fn is_empty(&self) -> bool {
        self.all_day.is_empty() && self.hours.iter().all(Vec::is_empty)
    }
}

#[derive(Debug, Clone)]
pub struct TimeGridView<'a> {
    pub columns: Vec<DayColumn<'a>>,
}

#[derive(Debug, Clone)]
pub struct ListView<'a> {
    pub groups: Vec<(CalendarDate, Vec<&'a CalendarEvent>)>,
}

impl ListView<'_> {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    grid: GridBuilder,
    binner: EventBinner,
    layouter: OverlapLayouter,
}

impl Planner {
    pub fn new(grid: GridBuilder, binner: EventBinner, layouter: OverlapLayouter) -> Self {
        Planner {
            grid,
            binner,
            layouter,
        }
    }

    pub fn from_config(config: &CaltileConfig) -> Self {
        Planner::new(config.grid_builder(), config.binner(), config.layouter())
    }

    pub fn month_view<'a>(
        &self,
        events: &'a [CalendarEvent],
        year: i32,
        month: u32,
    ) -> CalTileResult<MonthView<'a>> {
        let grid = self.grid.build_month_grid(year, month)?;
        let bins = self.binner.bin_by_day(events, grid.cells());
        tracing::debug!(year, month, rows = grid.weeks.len(), "built month view");
        Ok(MonthView { grid, bins })
    }

    /// Seven columns for the Sunday-first week containing `anchor`.
    pub fn week_view<'a>(
        &self,
        events: &'a [CalendarEvent],
        anchor: CalendarDate,
    ) -> CalTileResult<TimeGridView<'a>> {
        let columns = self
            .grid
            .week_of(anchor)?
            .into_iter()
            .map(|date| self.day_column(events, date))
            .collect::<CalTileResult<Vec<_>>>()?;
        tracing::debug!(%anchor, "built week view");
        Ok(TimeGridView { columns })
    }

    pub fn day_view<'a>(
        &self,
        events: &'a [CalendarEvent],
        day: CalendarDate,
    ) -> CalTileResult<TimeGridView<'a>> {
        Ok(TimeGridView {
            columns: vec![self.day_column(events, day)?],
        })
    }

    pub fn list_view<'a>(&self, events: &'a [CalendarEvent], from: CalendarDate) -> ListView<'a> {
        ListView {
            groups: self.binner.group_upcoming(events, from),
        }
    }

    fn day_column<'a>(
        &self,
        events: &'a [CalendarEvent],
        date: CalendarDate,
    ) -> CalTileResult<DayColumn<'a>> {
        let hours = (0..HOURS_PER_DAY)
            .map(|hour| {
                let bin = self.binner.bin_by_hour(events, date, hour)?;
                self.layouter.layout(&bin, date, hour)
            })
            .collect::<CalTileResult<Vec<_>>>()?;

        Ok(DayColumn {
            date,
            all_day: self.binner.all_day_events(events, date),
            hours,
        })
    }
}
