use anyhow::Result;
use caltile_core::config::CaltileConfig;
use owo_colors::OwoColorize;

pub fn run(init: bool) -> Result<()> {
    let path = CaltileConfig::config_path()?;

    if init {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        CaltileConfig::create_default_config(&path)?;
        println!("{} {}", "Created".green(), path.display());
        return Ok(());
    }

    let config = CaltileConfig::load_from(&path)?;
    let status = if path.exists() { "" } else { " (not created yet)" };
    println!("{}{}", path.display(), status.dimmed());
    println!("  row_policy      {:?}", config.row_policy);
    println!("  all_day_policy  {:?}", config.all_day_policy);
    println!("  default_color   {}", config.default_color);

    Ok(())
}
