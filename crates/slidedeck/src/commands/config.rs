use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = match Config::load() {
        Ok(config) => config,
        Err(_) => {
            eprintln!(
                "{} No config file at {}, showing defaults.",
                "Note:".yellow().bold(),
                path.display()
            );
            Config::default()
        }
    };

    println!("{} {}", "Config file:".bold(), path.display());
    println!();

    let settings = config.input_settings();
    let scaler = config.scaler();
    let rows = [
        (
            "defaults.theme",
            config.theme_name().unwrap_or("dark").to_string(),
        ),
        (
            "navigation.wheel_threshold",
            settings.wheel_threshold.to_string(),
        ),
        (
            "navigation.wheel_cooldown_ms",
            settings.wheel_cooldown.as_millis().to_string(),
        ),
        (
            "navigation.swipe_threshold",
            settings.swipe_threshold.to_string(),
        ),
        (
            "navigation.transition_ms",
            settings.transition_duration.as_millis().to_string(),
        ),
        ("scale.base_width", scaler.base_width.to_string()),
        ("scale.threshold", scaler.threshold.to_string()),
        ("scale.max", scaler.max.to_string()),
        (
            "background.star_mode",
            config.star_mode().label().to_lowercase(),
        ),
    ];
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in rows {
        println!("  {:width$}  {}", key.cyan(), value);
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    tracing::debug!(path = %path.display(), key, value, "config saved");
    println!("{} {} = {}", "Set".green().bold(), key.cyan(), value);
    Ok(())
}
