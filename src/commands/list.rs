use anyhow::Result;
use owo_colors::OwoColorize;

use super::ViewContext;
use crate::render::render_list;

/// Schedules from the start of the anchor's month onwards, or from today when
/// the anchor month is the current one.
pub fn run(ctx: &ViewContext) -> Result<()> {
    let events = ctx.events();
    let (month_start, month_end) = ctx.state.visible_range()?;
    let from = if (month_start..=month_end).contains(&ctx.today) {
        ctx.today
    } else {
        month_start
    };

    let view = ctx.planner().list_view(&events, from);

    if view.is_empty() {
        println!("{}", "No schedules".dimmed());
        return Ok(());
    }

    print!(
        "{}",
        render_list(&view, ctx.feed, &ctx.colors(), ctx.today, ctx.config.all_day_policy)
    );

    Ok(())
}
