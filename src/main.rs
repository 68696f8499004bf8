mod commands;
mod logging;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use caltile_core::CalendarDate;
use caltile_core::config::CaltileConfig;
use caltile_core::feed::ScheduleFeed;
use caltile_core::navigation::{CalendarState, NavAction, ViewKind};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "caltile")]
#[command(about = "Render month, week, day and list views of a schedule feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Month grid with the schedules of each day
    Month(ViewArgs),
    /// Hour-by-hour view of a Sunday-first week
    Week(ViewArgs),
    /// Hour-by-hour view of a single day
    Day(ViewArgs),
    /// Upcoming schedules grouped by date
    List(ViewArgs),
    /// Show the config path, or create a default config file
    Config {
        /// Write a commented default config file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Schedule feed (JSON) to render
    #[arg(short, long)]
    feed: PathBuf,

    /// Date to show (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<String>,

    /// Move this many views forward (negative for back)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    shift: i32,

    /// Hide schedules of this project (repeatable)
    #[arg(long = "hide")]
    hidden_projects: Vec<String>,

    /// Hide personal schedules
    #[arg(long)]
    no_mine: bool,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Month(args) => run_view(ViewKind::Month, args),
        Commands::Week(args) => run_view(ViewKind::Week, args),
        Commands::Day(args) => run_view(ViewKind::Day, args),
        Commands::List(args) => run_view(ViewKind::List, args),
        Commands::Config { init } => commands::config::run(init),
    }
}

fn run_view(view: ViewKind, args: ViewArgs) -> Result<()> {
    let config = CaltileConfig::load()?;
    let feed = ScheduleFeed::load(&args.feed)?;
    let today = CalendarDate::from(chrono::Local::now().date_naive());
    let state = build_state(view, today, &feed, &args)?;

    let ctx = commands::ViewContext {
        config: &config,
        feed: &feed,
        state: &state,
        today,
    };

    match view {
        ViewKind::Month => commands::month::run(&ctx),
        ViewKind::Week | ViewKind::Day => commands::time_grid::run(&ctx),
        ViewKind::List => commands::list::run(&ctx),
    }
}

fn build_state(
    view: ViewKind,
    today: CalendarDate,
    feed: &ScheduleFeed,
    args: &ViewArgs,
) -> Result<CalendarState> {
    let anchor = match args.date.as_deref() {
        Some(s) => s.parse()?,
        None => today,
    };

    let mut state = CalendarState::new(today)
        .reduce(NavAction::SetView(view))
        .reduce(NavAction::Select(anchor))
        .reduce(NavAction::SeedProjects(feed.project_ids()));

    let step = if args.shift < 0 { NavAction::Prev } else { NavAction::Next };
    for _ in 0..args.shift.unsigned_abs() {
        state = state.reduce(step.clone());
    }

    for project in &args.hidden_projects {
        if feed.project_title(project).is_none() {
            let available = feed.project_ids();
            anyhow::bail!(
                "Project '{}' not found. Available: {}",
                project,
                available.join(", ")
            );
        }
        // Repeating --hide for the same project must not show it again
        if state.selected_projects.get(project).copied().unwrap_or(false) {
            state = state.reduce(NavAction::ToggleProject(project.clone()));
        }
    }

    if args.no_mine {
        state = state.reduce(NavAction::ToggleMyCalendar);
    }

    tracing::debug!(view = %state.view, anchor = %state.anchor, "calendar state ready");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "projects": [
            {"id": "p1", "title": "Launch"},
            {"id": "p2", "title": "Research"}
        ]
    }"#;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn args(date: Option<&str>, shift: i32, hidden: &[&str], no_mine: bool) -> ViewArgs {
        ViewArgs {
            feed: PathBuf::from("feed.json"),
            date: date.map(str::to_string),
            shift,
            hidden_projects: hidden.iter().map(|p| p.to_string()).collect(),
            no_mine,
        }
    }

    fn state(view: ViewKind, args: &ViewArgs) -> Result<CalendarState> {
        let feed = ScheduleFeed::from_json(FEED).unwrap();
        build_state(view, date("2025-01-15"), &feed, args)
    }

    #[test]
    fn test_defaults_to_today_with_everything_selected() {
        let s = state(ViewKind::Month, &args(None, 0, &[], false)).unwrap();
        assert_eq!(s.anchor, date("2025-01-15"));
        assert_eq!(s.view, ViewKind::Month);
        assert_eq!(s.selected_projects.get("p1"), Some(&true));
        assert_eq!(s.selected_projects.get("p2"), Some(&true));
        assert!(s.my_calendar);
    }

    #[test]
    fn test_shift_steps_by_view() {
        let s = state(ViewKind::Week, &args(Some("2025-01-01"), 2, &[], false)).unwrap();
        assert_eq!(s.anchor, date("2025-01-15"));

        let s = state(ViewKind::Month, &args(Some("2025-01-31"), -2, &[], false)).unwrap();
        assert_eq!(s.anchor, date("2024-11-30"));

        let s = state(ViewKind::Day, &args(Some("2025-01-01"), -1, &[], false)).unwrap();
        assert_eq!(s.anchor, date("2024-12-31"));
    }

    #[test]
    fn test_hide_and_no_mine() {
        let s = state(ViewKind::List, &args(None, 0, &["p1"], true)).unwrap();
        assert_eq!(s.selected_projects.get("p1"), Some(&false));
        assert_eq!(s.selected_projects.get("p2"), Some(&true));
        assert!(!s.my_calendar);
    }

    #[test]
    fn test_repeated_hide_keeps_project_hidden() {
        let s = state(ViewKind::Month, &args(None, 0, &["p1", "p1"], false)).unwrap();
        assert_eq!(s.selected_projects.get("p1"), Some(&false));
    }

    #[test]
    fn test_unknown_project_or_bad_date_is_rejected() {
        let err = state(ViewKind::Month, &args(None, 0, &["nope"], false)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'nope' not found"), "{message}");
        assert!(message.contains("p1, p2"), "{message}");

        assert!(state(ViewKind::Month, &args(Some("2025-13-01"), 0, &[], false)).is_err());
    }
}
