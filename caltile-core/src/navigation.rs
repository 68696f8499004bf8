//! Calendar navigation state.
//!
//! `CalendarState` is a plain value; every transition goes through
//! `CalendarState::reduce`, which returns the next state.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::date::CalendarDate;
use crate::error::{CalTileError, CalTileResult};
use crate::event::CalendarEvent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Day,
    Week,
    #[default]
    Month,
    List,
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Day => write!(f, "day"),
            ViewKind::Week => write!(f, "week"),
            ViewKind::Month => write!(f, "month"),
            ViewKind::List => write!(f, "list"),
        }
    }
}

impl FromStr for ViewKind {
    type Err = CalTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ViewKind::Day),
            "week" => Ok(ViewKind::Week),
            "month" => Ok(ViewKind::Month),
            "list" => Ok(ViewKind::List),
            other => Err(CalTileError::InvalidArgument(format!(
                "unknown view '{other}'. Expected day, week, month or list"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Next,
    /// Jump back to the given "today"
    Today(CalendarDate),
    Select(CalendarDate),
    SetView(ViewKind),
    ToggleProject(String),
    ToggleMyCalendar,
    /// Select every listed project, unless a selection already exists
    SeedProjects(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    pub anchor: CalendarDate,
    pub view: ViewKind,
    /// Project filter; unknown projects count as deselected
    pub selected_projects: BTreeMap<String, bool>,
    /// Show personal (project-less) schedules
    pub my_calendar: bool,
}

impl CalendarState {
    pub fn new(today: CalendarDate) -> Self {
        CalendarState {
            anchor: today,
            view: ViewKind::default(),
            selected_projects: BTreeMap::new(),
            my_calendar: true,
        }
    }

    pub fn reduce(mut self, action: NavAction) -> Self {
        match action {
            NavAction::Prev => self.anchor = self.step(-1),
            NavAction::Next => self.anchor = self.step(1),
            NavAction::Today(today) | NavAction::Select(today) => self.anchor = today,
            NavAction::SetView(view) => self.view = view,
            NavAction::ToggleProject(id) => {
                let selected = self.selected_projects.entry(id).or_insert(false);
                *selected = !*selected;
            }
            NavAction::ToggleMyCalendar => self.my_calendar = !self.my_calendar,
            NavAction::SeedProjects(ids) => {
                if self.selected_projects.is_empty() {
                    self.selected_projects = ids.into_iter().map(|id| (id, true)).collect();
                }
            }
        }
        self
    }

    /// Anchor moved one view unit in `direction`; stays put at chrono's limits.
    fn step(&self, direction: i32) -> CalendarDate {
        let moved = match self.view {
            ViewKind::Day => self.anchor.add_days(i64::from(direction)),
            ViewKind::Week => self.anchor.add_days(7 * i64::from(direction)),
            ViewKind::Month | ViewKind::List => self.anchor.add_months(direction),
        };
        moved.unwrap_or(self.anchor)
    }

    pub fn is_visible(&self, event: &CalendarEvent) -> bool {
        match &event.project_id {
            Some(id) => self.selected_projects.get(id).copied().unwrap_or(false),
            None => self.my_calendar,
        }
    }

    pub fn filter_events(&self, events: &[CalendarEvent]) -> Vec<CalendarEvent> {
        events.iter().filter(|e| self.is_visible(e)).cloned().collect()
    }

    /// First and last date (inclusive) the current view shows or fetches.
    pub fn visible_range(&self) -> CalTileResult<(CalendarDate, CalendarDate)> {
        let out_of_range = || {
            CalTileError::InvalidArgument(format!("{} view of {} is out of range", self.view, self.anchor))
        };
        match self.view {
            ViewKind::Day => Ok((self.anchor, self.anchor)),
            ViewKind::Week => {
                let start = self.anchor.start_of_week().ok_or_else(out_of_range)?;
                let end = start.add_days(6).ok_or_else(out_of_range)?;
                Ok((start, end))
            }
            ViewKind::Month | ViewKind::List => {
                let end = self.anchor.last_of_month().ok_or_else(out_of_range)?;
                Ok((self.anchor.first_of_month(), end))
            }
        }
    }

    /// Header title, e.g. "March 2025".
    pub fn title(&self) -> String {
        self.anchor.naive().format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn state(anchor: &str, view: ViewKind) -> CalendarState {
        CalendarState::new(date(anchor)).reduce(NavAction::SetView(view))
    }

    fn event(project: Option<&str>) -> CalendarEvent {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let event = CalendarEvent::new("e", "e", start);
        match project {
            Some(p) => event.with_project(p),
            None => event,
        }
    }

    #[test]
    fn test_prev_next_per_view() {
        let day = state("2025-03-01", ViewKind::Day);
        assert_eq!(day.clone().reduce(NavAction::Prev).anchor, date("2025-02-28"));
        assert_eq!(day.reduce(NavAction::Next).anchor, date("2025-03-02"));

        let week = state("2025-01-01", ViewKind::Week);
        assert_eq!(week.clone().reduce(NavAction::Prev).anchor, date("2024-12-25"));
        assert_eq!(week.reduce(NavAction::Next).anchor, date("2025-01-08"));

        let month = state("2025-01-31", ViewKind::Month);
        assert_eq!(month.clone().reduce(NavAction::Next).anchor, date("2025-02-28"));
        assert_eq!(month.reduce(NavAction::Prev).anchor, date("2024-12-31"));
    }

    #[test]
    fn test_today_and_select() {
        let s = state("2025-01-01", ViewKind::Week)
            .reduce(NavAction::Next)
            .reduce(NavAction::Next)
            .reduce(NavAction::Today(date("2025-01-01")));
        assert_eq!(s.anchor, date("2025-01-01"));
        assert_eq!(s.view, ViewKind::Week);

        let s = s.reduce(NavAction::Select(date("2025-07-04")));
        assert_eq!(s.anchor, date("2025-07-04"));
    }

    #[test]
    fn test_project_filter() {
        let s = CalendarState::new(date("2025-01-01"))
            .reduce(NavAction::SeedProjects(vec!["a".into(), "b".into()]));
        assert!(s.is_visible(&event(Some("a"))));
        assert!(s.is_visible(&event(None)));
        assert!(!s.is_visible(&event(Some("zzz"))));

        let s = s
            .reduce(NavAction::ToggleProject("a".into()))
            .reduce(NavAction::ToggleMyCalendar);
        assert!(!s.is_visible(&event(Some("a"))));
        assert!(s.is_visible(&event(Some("b"))));
        assert!(!s.is_visible(&event(None)));

        // Seeding again doesn't clobber an existing selection
        let s = s.reduce(NavAction::SeedProjects(vec!["a".into()]));
        assert_eq!(s.selected_projects.get("a"), Some(&false));

        let events = vec![event(Some("a")), event(Some("b")), event(None)];
        assert_eq!(s.filter_events(&events).len(), 1);
    }

    #[test]
    fn test_visible_range() {
        assert_eq!(
            state("2025-01-01", ViewKind::Week).visible_range().unwrap(),
            (date("2024-12-29"), date("2025-01-04"))
        );
        assert_eq!(
            state("2024-02-17", ViewKind::Month).visible_range().unwrap(),
            (date("2024-02-01"), date("2024-02-29"))
        );
        assert_eq!(
            state("2024-02-17", ViewKind::Day).visible_range().unwrap(),
            (date("2024-02-17"), date("2024-02-17"))
        );
    }

    #[test]
    fn test_view_kind_parse_and_title() {
        assert_eq!("Week".parse::<ViewKind>().unwrap(), ViewKind::Week);
        assert!("year".parse::<ViewKind>().is_err());
        assert_eq!(state("2025-03-09", ViewKind::Month).title(), "March 2025");
    }
}
