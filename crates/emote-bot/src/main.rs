//! Main entry point for the emote tracker bot.

use anyhow::{Context, Result};
use clap::Parser;
use emote_bot::{run_reboot_command, Cli, EmoteBot, Services};
use emote_commands::ShutdownReason;
use emote_common::init_logging;
use emote_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let config = ConfigLoader::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&args.logging_config(&config.logging))?;

    info!("Starting emote tracker bot");

    let reboot_command = config.reboot_command.clone();
    let services = Services::connect(config).await?;
    let bot = EmoteBot::new(services);

    let reason = match bot.start().await {
        Ok(reason) => reason,
        Err(e) => {
            error!("Bot stopped with an error: {}", e);
            return Err(e.into());
        }
    };

    info!("Emote tracker bot has shut down ({})", reason);
    if reason == ShutdownReason::Reboot {
        run_reboot_command(&reboot_command).await?;
    }

    Ok(())
}
