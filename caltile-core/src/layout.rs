//! Lane layout for events sharing an hour row.
//!
//! Small bins cascade: each lane starts a fixed step further right and runs to
//! the column edge, so later events partly cover earlier ones. Past
//! `cascade_max_lanes` the bin switches to equal-width columns.
//!
//! All geometry is fractional: vertical values are in hour-row heights,
//! horizontal values in day-column widths.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{CalTileError, CalTileResult};
use crate::event::CalendarEvent;

/// Packed lanes never get narrower than this share of their spacing.
const MIN_PACKED_SHARE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Largest bin laid out as a cascade
    pub cascade_max_lanes: usize,
    /// Left offset added per cascaded lane
    pub cascade_step: f64,
    /// Share of the column used by packed lanes
    pub packed_span: f64,
    /// Gap subtracted from each packed lane
    pub packed_gutter: f64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        LaneConfig {
            cascade_max_lanes: 4,
            cascade_step: 0.2,
            packed_span: 0.9,
            packed_gutter: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub top_offset_fraction: f64,
    pub height_fraction: f64,
    pub lane_index: usize,
    pub left_offset_fraction: f64,
    pub lane_width_fraction: f64,
    /// The event started in an earlier row and is clipped to this row's top
    pub continues_from_previous_row: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapLayouter {
    config: LaneConfig,
}

impl OverlapLayouter {
    pub fn new(config: LaneConfig) -> Self {
        OverlapLayouter { config }
    }

    /// Place one hour-day bin. Lanes follow start order.
    pub fn layout<'a>(
        &self,
        bin: &[&'a CalendarEvent],
        day: CalendarDate,
        hour: u32,
    ) -> CalTileResult<Vec<PlacedEvent<'a>>> {
        let row_start = day.at_hour(hour).ok_or_else(|| {
            CalTileError::InvalidArgument(format!("hour {hour} is outside 0..24"))
        })?;

        let mut sorted = bin.to_vec();
        sorted.sort_by_key(|e| e.start);
        let count = sorted.len();

        sorted
            .into_iter()
            .enumerate()
            .map(|(lane, event)| -> CalTileResult<PlacedEvent<'a>> {
                event.validate()?;

                let clipped_start = event.start.max(row_start);
                let top = minutes(clipped_start - row_start) / 60.0;
                let height = minutes(event.effective_end() - clipped_start) / 60.0;
                let (left, width) = self.lane_geometry(lane, count);

                Ok(PlacedEvent {
                    event,
                    top_offset_fraction: top,
                    height_fraction: height,
                    lane_index: lane,
                    left_offset_fraction: left,
                    lane_width_fraction: width,
                    continues_from_previous_row: event.start < row_start,
                })
            })
            .collect()
    }

    /// Left offset and width of `lane` in a bin of `count` events.
    pub fn lane_geometry(&self, lane: usize, count: usize) -> (f64, f64) {
        let cfg = &self.config;
        if count <= cfg.cascade_max_lanes {
            let left = cfg.cascade_step * lane as f64;
            (left, 1.0 - left)
        } else {
            let spacing = cfg.packed_span / count as f64;
            let width = (spacing - cfg.packed_gutter).max(spacing * MIN_PACKED_SHARE);
            (spacing * lane as f64, width)
        }
    }
}

fn minutes(d: Duration) -> f64 {
    d.num_minutes() as f64
}
