//! Schedule events.
//!
//! Field names follow the schedule records served by the collaboration API
//! (`startDate`, `endDate`, `projectId`, ...), so a feed can be deserialized
//! as-is. Instants are wall-clock times in the viewer's zone.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

use crate::date::CalendarDate;
use crate::error::{CalTileError, CalTileResult};

/// A schedule entry as supplied by the caller. The crate only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(rename = "startDate", deserialize_with = "wall_clock::deserialize")]
    pub start: NaiveDateTime,
    #[serde(
        rename = "endDate",
        default,
        deserialize_with = "wall_clock::deserialize_opt"
    )]
    pub end: Option<NaiveDateTime>,
    /// Explicit color, overriding project and user colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_key: Option<String>,
    /// Owning project; `None` for personal schedules
    #[serde(default, deserialize_with = "non_empty")]
    pub project_id: Option<String>,
    #[serde(rename = "visible", default)]
    pub visibility: Visibility,
    /// Invited participants (user ids)
    #[serde(default)]
    pub invite_list: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// How to decide whether an event belongs in the all-day row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllDayPolicy {
    /// A missing end, or an end equal to the start, means all-day.
    #[default]
    MissingOrEqualEnd,
    /// Only an end equal to the start means all-day; a missing end is a
    /// zero-length timed event.
    EqualEndOnly,
}

impl CalendarEvent {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start: NaiveDateTime) -> Self {
        CalendarEvent {
            id: id.into(),
            title: title.into(),
            start,
            end: None,
            color_key: None,
            project_id: None,
            visibility: Visibility::Public,
            invite_list: Vec::new(),
        }
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn is_all_day(&self, policy: AllDayPolicy) -> bool {
        match (self.end, policy) {
            (None, AllDayPolicy::MissingOrEqualEnd) => true,
            (None, AllDayPolicy::EqualEndOnly) => false,
            (Some(end), _) => end == self.start,
        }
    }

    /// End instant, treating a missing end as zero-length.
    pub fn effective_end(&self) -> NaiveDateTime {
        self.end.unwrap_or(self.start)
    }

    pub fn start_date(&self) -> CalendarDate {
        CalendarDate::of(&self.start)
    }

    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.effective_end() - self.start).num_minutes()
    }

    /// Reject events that end before they start.
    pub fn validate(&self) -> CalTileResult<()> {
        if self.effective_end() < self.start {
            return Err(CalTileError::InvalidArgument(format!(
                "event '{}' ends ({}) before it starts ({})",
                self.id,
                self.effective_end(),
                self.start
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Lenient wall-clock parsing: the API sends full timestamps, minute
/// precision, or bare dates for all-day entries.
mod wall_clock {
    use super::*;

    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

    pub(super) fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid date/time '{s}'")))
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date/time '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        wall_clock::parse(s).unwrap()
    }

    #[test]
    fn test_all_day_policies() {
        let open = CalendarEvent::new("1", "Demo day", at("2025-01-01T00:00"));
        let same = open.clone().with_end(at("2025-01-01T00:00"));
        let timed = open.clone().with_end(at("2025-01-01T01:00"));

        assert!(open.is_all_day(AllDayPolicy::MissingOrEqualEnd));
        assert!(!open.is_all_day(AllDayPolicy::EqualEndOnly));
        assert!(same.is_all_day(AllDayPolicy::MissingOrEqualEnd));
        assert!(same.is_all_day(AllDayPolicy::EqualEndOnly));
        assert!(!timed.is_all_day(AllDayPolicy::MissingOrEqualEnd));
    }

    #[test]
    fn test_validate_rejects_reversed_interval() {
        let event = CalendarEvent::new("1", "Backwards", at("2025-01-01T10:00"))
            .with_end(at("2025-01-01T09:00"));
        assert!(matches!(
            event.validate(),
            Err(CalTileError::InvalidArgument(_))
        ));
        assert_eq!(event.duration_minutes(), -60);
    }

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": "s-1",
            "title": "Sprint review",
            "startDate": "2025-01-01T16:00:00",
            "endDate": "2025-01-01T17:30",
            "visible": "PRIVATE",
            "projectId": "p-9",
            "inviteList": ["u-1", "u-2"]
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.start, at("2025-01-01T16:00"));
        assert_eq!(event.end, Some(at("2025-01-01T17:30")));
        assert_eq!(event.visibility, Visibility::Private);
        assert_eq!(event.project_id.as_deref(), Some("p-9"));
        assert_eq!(event.invite_list.len(), 2);
        assert_eq!(event.duration_minutes(), 90);
    }

    #[test]
    fn test_deserialize_personal_all_day_record() {
        let json = r#"{
            "id": "s-2",
            "title": "Holiday",
            "startDate": "2025-01-01",
            "endDate": "",
            "projectId": ""
        }"#;
        let event: CalendarEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.project_id, None);
        assert_eq!(event.end, None);
        assert_eq!(event.visibility, Visibility::Public);
        assert!(event.is_all_day(AllDayPolicy::default()));
    }

    #[test]
    fn test_deserialize_rejects_garbage_time() {
        let json = r#"{"id": "x", "title": "x", "startDate": "tomorrow"}"#;
        assert!(serde_json::from_str::<CalendarEvent>(json).is_err());
    }
}
