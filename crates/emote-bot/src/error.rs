//! Application-wide error types using thiserror.

use emote_common::EmoteBotError;
use emote_config::ConfigError;
use emote_i18n::I18nError;
use poise::serenity_prelude as serenity;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error raised by the tracking or command crates.
    #[error(transparent)]
    Core(#[from] EmoteBotError),

    /// The configured locale is unusable.
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reboot command ran but did not succeed.
    #[error("Reboot command failed: {0}")]
    RebootFailed(String),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
