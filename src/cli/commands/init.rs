//! Init and Config commands.

use std::path::PathBuf;

use anyhow::{Context, anyhow};

use crate::config::Settings;

/// Run init command - create configuration file.
pub fn run_init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let config_path = path
        .or_else(Settings::default_config_path)
        .context("no configuration directory on this platform, pass --path")?;

    let path = Settings::init_config_file(&config_path, force).map_err(|e| anyhow!("{e}"))?;
    println!("Created configuration file at: {}", path.display());
    println!("Edit this file or set USER/HOST/RPATH/RURL/LPATH to configure uploads.");
    Ok(())
}

/// Run config command - display current configuration.
pub fn run_config(config: &Settings) -> anyhow::Result<()> {
    println!("Current Configuration:");
    println!("{}", "=".repeat(50));
    let toml_str = toml::to_string_pretty(config).context("Error displaying config")?;
    println!("{toml_str}");

    for warning in config.warnings() {
        eprintln!("Warning: {warning}");
    }
    Ok(())
}
