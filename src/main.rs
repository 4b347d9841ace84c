//! Dhinchak - Multi-session chat CLI
//!
//! Main entry point for the Dhinchak chat client.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dhinchak::cli::{Cli, Commands};
use dhinchak::commands;
use dhinchak::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration; a missing API credential fails here, before
    // any command runs
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { model } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }

            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { prompt, model } => {
            tracing::info!("Starting one-shot ask mode");
            if let Some(m) = &model {
                tracing::debug!("Using model override: {}", m);
            }

            commands::ask::run_ask(config, prompt).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dhinchak=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
