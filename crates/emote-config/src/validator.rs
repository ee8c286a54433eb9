//! Runtime validation of a loaded configuration.

use crate::schema::Config;
use emote_i18n::Locale;
use thiserror::Error;

/// A configuration that cannot be used to start the bot.
#[derive(Debug, Error)]
#[error("invalid configuration: {}", .problems.join("; "))]
pub struct ValidationErrors {
    /// Every problem found, in field order.
    pub problems: Vec<String>,
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks every field and reports all problems at once.
    pub fn validate(config: &Config) -> Result<(), ValidationErrors> {
        let mut problems = Vec::new();

        if config.discord.token.trim().is_empty() {
            problems.push("discord.token cannot be empty".to_string());
        }
        if config.discord.prefix.trim().is_empty() {
            problems.push("discord.prefix cannot be empty".to_string());
        }
        if config.discord.prefix.chars().any(char::is_whitespace) {
            problems.push("discord.prefix cannot contain whitespace".to_string());
        }
        if config.database.url.trim().is_empty() {
            problems.push("database.url cannot be empty".to_string());
        }
        if config.database.max_connections == 0 {
            problems.push("database.max_connections must be at least 1".to_string());
        }
        if config.tracking.statistics_days == 0 {
            problems.push("tracking.statistics_days must be at least 1".to_string());
        }
        if config.tracking.retention_days == 0 {
            problems.push("tracking.retention_days must be at least 1".to_string());
        }
        if config.tracking.reaction_history == 0 {
            problems.push("tracking.reaction_history must be at least 1".to_string());
        }
        if config.commands.usage_limit == 0 {
            problems.push("commands.usage_limit must be at least 1".to_string());
        }
        if config.commands.clean_limit == 0 {
            problems.push("commands.clean_limit must be at least 1".to_string());
        }
        if config.locale.parse::<Locale>().is_err() {
            problems.push(format!("locale '{}' is not supported", config.locale));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { problems })
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        ConfigValidator::validate(self)
    }
}
