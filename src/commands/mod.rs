pub mod config;
pub mod list;
pub mod month;
pub mod time_grid;

use caltile_core::CalendarDate;
use caltile_core::color::ColorChain;
use caltile_core::config::CaltileConfig;
use caltile_core::event::CalendarEvent;
use caltile_core::feed::ScheduleFeed;
use caltile_core::navigation::CalendarState;
use caltile_core::view::Planner;

/// Everything a view command needs, resolved once in `main`.
pub struct ViewContext<'a> {
    pub config: &'a CaltileConfig,
    pub feed: &'a ScheduleFeed,
    pub state: &'a CalendarState,
    pub today: CalendarDate,
}

impl ViewContext<'_> {
    /// Schedules that pass the project / "my calendar" filter.
    pub fn events(&self) -> Vec<CalendarEvent> {
        self.state.filter_events(&self.feed.schedules)
    }

    pub fn planner(&self) -> Planner {
        Planner::from_config(self.config)
    }

    pub fn colors(&self) -> ColorChain {
        self.feed.color_chain(self.config.color_chain())
    }
}
