//! Homework bot CLI
//!
//! Command-line interface for the homework review status notification service.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config, Credentials};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Sends Telegram notifications when a homework review status changes")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    retry_interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stdout)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_interval={:?}, log_level={:?}",
        args.config,
        args.retry_interval,
        args.log_level
    );

    if let Ok(path) = dotenv::dotenv() {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let credentials = Credentials::from_env().inspect_err(|e| {
        tracing::error!("Environment tokens are not available: {}", e);
    })?;

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(retry_interval) = args.retry_interval {
        config.polling.retry_interval_seconds = retry_interval;
    }

    tracing::info!("Starting homework bot");
    tracing::info!("Endpoint: {}", config.practicum.endpoint);
    tracing::info!(
        "Retry interval: {}s",
        config.polling.retry_interval_seconds
    );

    homework_bot::run(config, credentials).await?;

    Ok(())
}
