//! Main entry point for Omni Bot.

use anyhow::Context;
use clap::Parser;
use omni_bot::OmniBot;
use omni_common::init_logging;
use omni_config::{ConfigLoader, CONFIG_PATH_ENV};
use std::path::PathBuf;
use tracing::{error, info};

/// Discord bot for betting lines, injury reports, AI answers and stock charts.
#[derive(Debug, Parser)]
#[command(name = "omni-bot", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `omni_providers=debug,info`
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    let mut logging = config.logging.to_logging_config();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    logging.json_format |= cli.json_logs;
    let _log_guard = init_logging(&logging).context("Failed to initialize logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => error!("Ignoring unreadable .env file: {}", e),
    }
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Omni Bot");

    let bot = OmniBot::new(config);
    tokio::select! {
        result = bot.start() => {
            if let Err(e) = &result {
                error!("Bot stopped: {}", e);
            }
            result?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
