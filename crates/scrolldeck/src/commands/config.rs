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
    println!("{} {}", "Config file:".bold(), path.display());

    let config = match Config::load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e.to_string().dimmed());
            Config::default()
        }
    };

    println!();
    println!("{}", "Effective settings:".bold());
    let scroll = config.scroll().unwrap_or_default();
    let rows = [
        ("defaults.theme", config.theme().unwrap_or("light").to_string()),
        ("defaults.scroll", scroll.name().to_string()),
        ("defaults.page_padding", config.page_padding().name().to_string()),
        ("defaults.particles", config.particles().to_string()),
        (
            "defaults.loader",
            (if config.loader_enabled() { "on" } else { "off" }).to_string(),
        ),
        (
            "defaults.settle_timeout_ms",
            config.settle_timeout().as_millis().to_string(),
        ),
    ];
    for (key, value) in rows {
        println!("  {:<28} {}", key.cyan(), value);
    }
    Ok(())
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    println!(
        "{} {} = {} ({})",
        "Saved".green(),
        key,
        value,
        path.display()
    );
    Ok(())
}
