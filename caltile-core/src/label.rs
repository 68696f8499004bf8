//! Human-readable time labels.

use chrono::{NaiveDateTime, Timelike};

use crate::event::{AllDayPolicy, CalendarEvent};

pub const ALL_DAY_LABEL: &str = "All day";

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 { "AM" } else { "PM" }
}

/// "9" on the hour, "9:30" otherwise.
fn clock(t: &NaiveDateTime) -> String {
    let hour12 = match t.hour() % 12 {
        0 => 12,
        h => h,
    };
    if t.minute() == 0 {
        hour12.to_string()
    } else {
        format!("{}:{:02}", hour12, t.minute())
    }
}

/// Label for the hour gutter of a time grid, e.g. "12 AM", "3 PM".
pub fn hour_label(hour: u32) -> String {
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", hour12, meridiem(hour % 24))
}

/// "All day", "2:45 PM", "9 – 10:30 AM" or "11 AM – 1 PM".
///
/// The AM/PM marker is written once when both ends share it. Events ending
/// on a later day get a "(+N)" suffix.
pub fn time_label(event: &CalendarEvent, policy: AllDayPolicy) -> String {
    if event.is_all_day(policy) {
        return ALL_DAY_LABEL.to_string();
    }

    let start = &event.start;
    let end = match event.end {
        Some(end) if end != event.start => end,
        _ => return format!("{} {}", clock(start), meridiem(start.hour())),
    };

    let day_shift = (end.date() - start.date()).num_days();
    let mut label = if meridiem(start.hour()) == meridiem(end.hour()) && day_shift == 0 {
        format!("{} – {} {}", clock(start), clock(&end), meridiem(end.hour()))
    } else {
        format!(
            "{} {} – {} {}",
            clock(start),
            meridiem(start.hour()),
            clock(&end),
            meridiem(end.hour())
        )
    };
    if day_shift > 0 {
        label.push_str(&format!(" (+{day_shift})"));
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    fn label(start: &str, end: Option<&str>) -> String {
        let mut event = CalendarEvent::new("e", "e", at(start));
        event.end = end.map(at);
        time_label(&event, AllDayPolicy::EqualEndOnly)
    }

    #[test]
    fn test_all_day() {
        assert_eq!(label("2025-01-01T00:00", Some("2025-01-01T00:00")), ALL_DAY_LABEL);
        let open = CalendarEvent::new("e", "e", at("2025-01-01T00:00"));
        assert_eq!(time_label(&open, AllDayPolicy::MissingOrEqualEnd), ALL_DAY_LABEL);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(label("2025-01-01T09:00", Some("2025-01-01T10:30")), "9 – 10:30 AM");
        assert_eq!(label("2025-01-01T11:00", Some("2025-01-01T13:00")), "11 AM – 1 PM");
        assert_eq!(label("2025-01-01T16:00", Some("2025-01-01T17:00")), "4 – 5 PM");
        assert_eq!(label("2025-01-01T00:05", Some("2025-01-01T00:35")), "12:05 – 12:35 AM");
    }

    #[test]
    fn test_open_ended_and_overnight() {
        assert_eq!(label("2025-01-01T14:45", None), "2:45 PM");
        assert_eq!(
            label("2025-01-01T22:00", Some("2025-01-02T02:00")),
            "10 PM – 2 AM (+1)"
        );
        assert_eq!(
            label("2025-01-01T09:00", Some("2025-01-02T10:00")),
            "9 AM – 10 AM (+1)"
        );
    }

    #[test]
    fn test_hour_labels() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(9), "9 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(23), "11 PM");
    }
}
