use anyhow::Result;
use owo_colors::OwoColorize;

use super::ViewContext;
use crate::render::render_month;

pub fn run(ctx: &ViewContext) -> Result<()> {
    let events = ctx.events();
    let anchor = ctx.state.anchor;
    let view = ctx.planner().month_view(&events, anchor.year(), anchor.month())?;

    println!("{}", ctx.state.title().bold());
    println!();
    print!(
        "{}",
        render_month(&view, &ctx.colors(), ctx.today, ctx.config.all_day_policy)
    );

    Ok(())
}
