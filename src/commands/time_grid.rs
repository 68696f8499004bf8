use anyhow::Result;
use caltile_core::navigation::ViewKind;
use owo_colors::OwoColorize;

use super::ViewContext;
use crate::render::render_time_grid;

/// Week and day views.
pub fn run(ctx: &ViewContext) -> Result<()> {
    let events = ctx.events();
    let planner = ctx.planner();
    let view = match ctx.state.view {
        ViewKind::Day => planner.day_view(&events, ctx.state.anchor)?,
        _ => planner.week_view(&events, ctx.state.anchor)?,
    };

    let (from, to) = ctx.state.visible_range()?;
    let range = if from == to {
        from.to_string()
    } else {
        format!("{from} – {to}")
    };
    println!("{} {}", ctx.state.title().bold(), range.dimmed());
    println!();
    print!(
        "{}",
        render_time_grid(&view, &ctx.colors(), ctx.today, ctx.config.all_day_policy)
    );

    Ok(())
}
