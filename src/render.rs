//! Terminal rendering of caltile view models.
//!
//! Renderers return strings; commands decide where to print them. Colors
//! come from the resolved color key of each event, mapped onto the
//! terminal's ANSI palette.

use caltile_core::CalendarDate;
use caltile_core::color::ColorChain;
use caltile_core::event::{AllDayPolicy, CalendarEvent};
use caltile_core::feed::ScheduleFeed;
use caltile_core::label::{hour_label, time_label};
use caltile_core::layout::PlacedEvent;
use caltile_core::view::{ListView, MonthView, TimeGridView};
use owo_colors::{AnsiColors, OwoColorize};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Width of one month-grid cell in characters
const CELL_WIDTH: usize = 14;

/// Event lines shown per month cell before collapsing into "+N more"
const MAX_CELL_EVENTS: usize = 3;

/// Characters representing the full width of a day column
const LANE_BAR_WIDTH: usize = 10;

/// Map a color key ("bg-sky-200", "#ccc", "red") onto the ANSI palette.
pub fn terminal_color(key: &str) -> AnsiColors {
    let key = key.to_ascii_lowercase();
    let has = |names: &[&str]| names.iter().any(|n| key.contains(n));

    if has(&["red", "rose", "pink"]) {
        AnsiColors::Red
    } else if has(&["orange", "amber", "yellow"]) {
        AnsiColors::Yellow
    } else if has(&["green", "lime", "emerald", "teal"]) {
        AnsiColors::Green
    } else if has(&["cyan", "sky"]) {
        AnsiColors::Cyan
    } else if has(&["blue", "indigo"]) {
        AnsiColors::Blue
    } else if has(&["purple", "violet", "fuchsia"]) {
        AnsiColors::Magenta
    } else {
        AnsiColors::White
    }
}

fn paint(text: &str, key: &str) -> String {
    text.color(terminal_color(key)).to_string()
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width))
}

/// Horizontal position of a placed event inside its day column.
fn lane_bar(placed: &PlacedEvent<'_>, width: usize) -> String {
    let left = (placed.left_offset_fraction * width as f64).round() as usize;
    let span = ((placed.lane_width_fraction * width as f64).round() as usize).max(1);
    let left = left.min(width.saturating_sub(1));
    let span = span.min(width - left);
    format!("{}{}{}", " ".repeat(left), "█".repeat(span), " ".repeat(width - left - span))
}

/// "Today", "Tomorrow" or e.g. "Wed Jan 1".
fn date_label(date: CalendarDate, today: CalendarDate) -> String {
    match (date.naive() - today.naive()).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.naive().format("%a %b %-d").to_string(),
    }
}

fn cell_entry(event: &CalendarEvent, policy: AllDayPolicy) -> String {
    if event.is_all_day(policy) {
        format!("• {}", event.title)
    } else {
        format!("• {} {}", event.start.format("%-I:%M%P"), event.title)
    }
}

pub fn render_month(
    view: &MonthView<'_>,
    colors: &ColorChain,
    today: CalendarDate,
    policy: AllDayPolicy,
) -> String {
    let mut lines = Vec::new();

    let header: String = WEEKDAYS.iter().map(|d| pad(d, CELL_WIDTH)).collect();
    lines.push(header.dimmed().to_string());
    let rule = "─".repeat(CELL_WIDTH * WEEKDAYS.len());

    for week in &view.grid.weeks {
        lines.push(rule.dimmed().to_string());

        let days: String = week
            .iter()
            .map(|cell| {
                let label = pad(&format!("{:>2}", cell.day_of_month), CELL_WIDTH);
                if cell.date == today {
                    label.reversed().to_string()
                } else if cell.belongs_to_requested_month {
                    label
                } else {
                    label.dimmed().to_string()
                }
            })
            .collect();
        lines.push(days);

        // Only days of the requested month list their schedules
        let bins: Vec<&[&CalendarEvent]> = week
            .iter()
            .map(|cell| {
                if cell.belongs_to_requested_month {
                    view.events_on(cell.date)
                } else {
                    &[][..]
                }
            })
            .collect();

        let depth = bins.iter().map(|b| b.len()).max().unwrap_or(0).min(MAX_CELL_EVENTS);
        for slot in 0..depth {
            let line: String = bins
                .iter()
                .map(|bin| {
                    let overflow = bin.len() > MAX_CELL_EVENTS && slot == MAX_CELL_EVENTS - 1;
                    if overflow {
                        let more = format!("+{} more", bin.len() - slot);
                        pad(&more, CELL_WIDTH).dimmed().to_string()
                    } else if let Some(event) = bin.get(slot) {
                        let text = pad(&cell_entry(event, policy), CELL_WIDTH);
                        paint(&text, colors.resolve(event))
                    } else {
                        " ".repeat(CELL_WIDTH)
                    }
                })
                .collect();
            lines.push(line);
        }
    }
    lines.push(rule.dimmed().to_string());

    lines.join("\n") + "\n"
}

pub fn render_time_grid(
    view: &TimeGridView<'_>,
    colors: &ColorChain,
    today: CalendarDate,
    policy: AllDayPolicy,
) -> String {
    let mut lines = Vec::new();

    for column in &view.columns {
        let heading = format!("{} {}", date_label(column.date, today), column.date);
        if column.date == today {
            lines.push(heading.bold().underline().to_string());
        } else {
            lines.push(heading.bold().to_string());
        }

        if column.is_empty() {
            lines.push(format!("  {}", "No schedules".dimmed()));
            lines.push(String::new());
            continue;
        }

        for event in &column.all_day {
            let marker = paint("■", colors.resolve(event));
            lines.push(format!("  {:>5}  {} {}", "all", marker, event.title));
        }

        for (hour, row) in column.hours.iter().enumerate() {
            // Events spanning several rows are listed once per column: where
            // they start, or in the first row if they began the day before
            for placed in row
                .iter()
                .filter(|p| !p.continues_from_previous_row || hour == 0)
            {
                let event = placed.event;
                let bar = paint(&lane_bar(placed, LANE_BAR_WIDTH), colors.resolve(event));
                lines.push(format!(
                    "  {:>5}  {} {}  {}",
                    hour_label(hour as u32),
                    bar,
                    event.title,
                    time_label(event, policy).dimmed()
                ));
            }
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

pub fn render_list(
    view: &ListView<'_>,
    feed: &ScheduleFeed,
    colors: &ColorChain,
    today: CalendarDate,
    policy: AllDayPolicy,
) -> String {
    let mut lines = Vec::new();

    for (date, events) in &view.groups {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let label = format!("{} {}", date_label(*date, today), date.naive().format("%B %-d"));
        lines.push(label.bold().to_string());

        for event in events {
            let dot = paint("●", colors.resolve(event));
            let project = event
                .project_id
                .as_deref()
                .and_then(|id| feed.project_title(id))
                .map(|title| format!("[{title}]"))
                .unwrap_or_default();
            lines.push(format!(
                "  {} {:<18} {} {}",
                dot,
                time_label(event, policy),
                event.title,
                project.dimmed()
            ));
        }
    }

    lines.join("\n") + "\n"
}
