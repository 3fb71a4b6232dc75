// src/main.rs

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use depwalk::Config;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let install = !cli.no_install;

    match cli.command {
        Commands::Tree { packages } => commands::cmd_tree(&config, &packages, install, cli.json),
        Commands::Order { packages } => commands::cmd_order(&config, &packages, install, cli.json),
        Commands::Check { packages } => commands::cmd_check(&config, &packages, install, cli.json),
        Commands::Counts { packages } => {
            commands::cmd_counts(&config, &packages, install, cli.json)
        }
    }
}
