//! Event color resolution.
//!
//! Colors come from an ordered chain of sources; the first one that yields a
//! non-empty value wins. Values are opaque keys (CSS classes, hex codes, ...).

use std::collections::HashMap;

use crate::event::CalendarEvent;

pub const DEFAULT_COLOR: &str = "bg-slate-100";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// The event's own `color_key`
    Event,
    /// The color of the event's project
    Project,
    /// The viewing user's personal color
    User,
    Default,
}

pub const FALLBACK_ORDER: [ColorSource; 4] = [
    ColorSource::Event,
    ColorSource::Project,
    ColorSource::User,
    ColorSource::Default,
];

#[derive(Debug, Clone)]
pub struct ColorChain {
    project_colors: HashMap<String, String>,
    user_color: Option<String>,
    default_color: String,
}

impl Default for ColorChain {
    fn default() -> Self {
        ColorChain::new(DEFAULT_COLOR)
    }
}

impl ColorChain {
    pub fn new(default_color: impl Into<String>) -> Self {
        ColorChain {
            project_colors: HashMap::new(),
            user_color: None,
            default_color: default_color.into(),
        }
    }

    pub fn with_user_color(mut self, color: impl Into<String>) -> Self {
        self.user_color = Some(color.into());
        self
    }

    pub fn with_project_color(mut self, project_id: impl Into<String>, color: impl Into<String>) -> Self {
        self.project_colors.insert(project_id.into(), color.into());
        self
    }

    /// What a single source says about `event`, if anything.
    pub fn lookup<'s>(&'s self, source: ColorSource, event: &'s CalendarEvent) -> Option<&'s str> {
        let color = match source {
            ColorSource::Event => event.color_key.as_deref(),
            ColorSource::Project => event
                .project_id
                .as_ref()
                .and_then(|id| self.project_colors.get(id))
                .map(String::as_str),
            ColorSource::User => self.user_color.as_deref(),
            ColorSource::Default => Some(self.default_color.as_str()),
        };
        color.filter(|c| !c.trim().is_empty())
    }

    /// Walk `FALLBACK_ORDER` and report which source answered.
    pub fn resolve_with_source<'s>(&'s self, event: &'s CalendarEvent) -> (ColorSource, &'s str) {
        FALLBACK_ORDER
            .iter()
            .find_map(|source| self.lookup(*source, event).map(|c| (*source, c)))
            .unwrap_or((ColorSource::Default, self.default_color.as_str()))
    }

    pub fn resolve<'s>(&'s self, event: &'s CalendarEvent) -> &'s str {
        self.resolve_with_source(event).1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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
    fn test_project_color_wins() {
        let chain = ColorChain::default()
            .with_user_color("bg-rose-200")
            .with_project_color("p1", "bg-sky-200");

        assert_eq!(
            chain.resolve_with_source(&event(Some("p1"))),
            (ColorSource::Project, "bg-sky-200")
        );
    }

    #[test]
    fn test_falls_back_to_user_then_default() {
        let chain = ColorChain::default().with_project_color("p1", "bg-sky-200");
        assert_eq!(chain.resolve(&event(Some("unknown"))), DEFAULT_COLOR);

        let chain = chain.with_user_color("bg-rose-200");
        assert_eq!(
            chain.resolve_with_source(&event(Some("unknown"))),
            (ColorSource::User, "bg-rose-200")
        );
        assert_eq!(chain.resolve(&event(None)), "bg-rose-200");
    }

    #[test]
    fn test_event_color_overrides_and_blank_is_skipped() {
        let chain = ColorChain::new("#ccc").with_project_color("p1", "  ");

        let mut colored = event(Some("p1"));
        assert_eq!(chain.resolve_with_source(&colored), (ColorSource::Default, "#ccc"));

        colored.color_key = Some("bg-lime-300".into());
        assert_eq!(chain.resolve(&colored), "bg-lime-300");
    }
}
