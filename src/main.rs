use std::path::Path;

use clap::Parser;

use shotput::cli::commands::{init, upload, watch};
use shotput::cli::{Cli, Commands};
use shotput::config::Settings;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command.unwrap_or(Commands::Watch) {
        // Init must work before any configuration exists
        Commands::Init { force, path } => init::run_init(path, force),
        Commands::Watch => watch::run_watch(load_settings(config)).await,
        Commands::Upload { file } => upload::run_upload(load_settings(config), file).await,
        Commands::Config => init::run_config(&load_settings(config)),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

/// Load settings and start logging, exiting on configuration errors.
fn load_settings(config: Option<&Path>) -> Settings {
    let settings = Settings::load(config).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });
    shotput::logging::init_with_config(&settings.logging);
    settings
}
